use core::num::NonZeroU32;
use core::ops::RangeInclusive;

use crate::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// The extent every item occupies along the scroll axis.
///
/// Zero is rejected at construction, so range and position math never divides by zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct ItemExtent(NonZeroU32);

impl ItemExtent {
    pub fn new(extent: u32) -> Result<Self, ConfigError> {
        NonZeroU32::new(extent)
            .map(Self)
            .ok_or(ConfigError::ZeroItemExtent)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for ItemExtent {
    type Error = ConfigError;

    fn try_from(extent: u32) -> Result<Self, Self::Error> {
        Self::new(extent)
    }
}

impl From<ItemExtent> for u32 {
    fn from(extent: ItemExtent) -> Self {
        extent.get()
    }
}

/// An inclusive `[start_index, end_index]` window into a non-empty collection.
///
/// An empty collection has no range at all; APIs return `Option<VisibleRange>` for that case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize, // inclusive
}

impl VisibleRange {
    pub fn len(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    /// Always `false`: a range holds at least one index.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start_index..=self.end_index).contains(&index)
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start_index..=self.end_index
    }

    /// The same window as a half-open range, handy for slicing.
    pub fn to_exclusive(&self) -> core::ops::Range<usize> {
        self.start_index..self.end_index + 1
    }
}

/// Identity of a rendered item.
///
/// `Id` carries a caller-supplied identity; `Index` is the positional fallback. The two variants
/// never compare equal, so a fallback key cannot collide with a caller identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKey<K> {
    Id(K),
    Index(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleItem {
    pub index: usize,
    /// Absolute offset inside the spacer (`index * item_extent`).
    pub offset: u64,
    pub extent: u32,
}

impl VisibleItem {
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.extent as u64)
    }
}
