/// The latest known scroll geometry of the hosting surface.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`, so it can be
/// captured and restored across sessions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub offset: u64,
    pub viewport_extent: u32,
}

impl ScrollState {
    pub fn new(offset: u64, viewport_extent: u32) -> Self {
        Self {
            offset,
            viewport_extent,
        }
    }

    pub fn viewport_end(&self) -> u64 {
        self.offset.saturating_add(self.viewport_extent as u64)
    }
}

/// Converts a fractional pixel offset reported by a host into an engine offset.
///
/// Negative values (overscroll bounce) and NaN map to `0`; the fraction is dropped.
pub fn offset_from_px(px: f64) -> u64 {
    // `as` saturates: NaN and negatives become 0, +inf becomes u64::MAX.
    px as u64
}

/// Same as [`offset_from_px`], for viewport extents.
pub fn extent_from_px(px: f64) -> u32 {
    px as u32
}
