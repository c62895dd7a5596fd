use crate::{Coalesce, ConfigError, ItemExtent};

/// Overscan applied when none is configured.
pub const DEFAULT_OVERSCAN: usize = 3;

/// Configuration for [`crate::ListWindow`].
///
/// Plain data, cheap to copy. With `feature = "serde"`, it can be loaded from host
/// configuration; `validate` (or `ListWindow::new`) rejects unusable values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindowOptions {
    /// Extent shared by every item along the scroll axis (e.g. row height).
    pub item_extent: u32,
    /// Initial extent of the viewport along the scroll axis.
    pub viewport_extent: u32,
    /// Extra items rendered beyond each edge of the viewport.
    pub overscan: usize,
    pub initial_offset: u64,
    pub coalesce: Coalesce,
    /// When disabled, query methods report no range and a zero extent.
    pub enabled: bool,
}

impl WindowOptions {
    pub fn new(item_extent: u32, viewport_extent: u32) -> Self {
        Self {
            item_extent,
            viewport_extent,
            overscan: DEFAULT_OVERSCAN,
            initial_offset: 0,
            coalesce: Coalesce::Immediate,
            enabled: true,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: u64) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_coalesce(mut self, coalesce: Coalesce) -> Self {
        self.coalesce = coalesce;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Checks the options and returns the validated item extent.
    pub fn validate(&self) -> Result<ItemExtent, ConfigError> {
        let extent = ItemExtent::new(self.item_extent)?;
        if self.viewport_extent == 0 {
            return Err(ConfigError::ZeroViewportExtent);
        }
        Ok(extent)
    }
}

impl Default for WindowOptions {
    /// A single-row-per-unit list with no viewport yet. Invalid until `viewport_extent` is set.
    fn default() -> Self {
        Self::new(1, 0)
    }
}
