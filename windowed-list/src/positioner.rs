use crate::{Align, ItemExtent, VisibleItem};

/// Maps logical indexes to offsets inside the full-extent spacer.
///
/// Positions are computed on demand from `count` and the shared item extent; nothing is cached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemPositioner {
    item_extent: ItemExtent,
    count: usize,
}

impl ItemPositioner {
    pub fn new(item_extent: ItemExtent, count: usize) -> Self {
        Self { item_extent, count }
    }

    pub fn item_extent(&self) -> ItemExtent {
        self.item_extent
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Offset of the item at `index`, or `None` when `index` is out of bounds.
    pub fn position_of(&self, index: usize) -> Option<u64> {
        (index < self.count).then(|| self.unchecked_position(index))
    }

    pub fn item(&self, index: usize) -> Option<VisibleItem> {
        let offset = self.position_of(index)?;
        Some(VisibleItem {
            index,
            offset,
            extent: self.item_extent.get(),
        })
    }

    /// Extent of the spacer: `count * item_extent`.
    pub fn total_extent(&self) -> u64 {
        (self.count as u64).saturating_mul(self.item_extent.get() as u64)
    }

    /// Index of the item covering `offset`, clamped to the last item.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let raw = offset / self.item_extent.get() as u64;
        let index = usize::try_from(raw).unwrap_or(usize::MAX);
        Some(index.min(self.count - 1))
    }

    pub fn max_scroll_offset(&self, viewport_extent: u32) -> u64 {
        self.total_extent().saturating_sub(viewport_extent as u64)
    }

    pub fn clamp_offset(&self, offset: u64, viewport_extent: u32) -> u64 {
        offset.min(self.max_scroll_offset(viewport_extent))
    }

    /// Computes the (clamped) scroll offset that brings `index` into view with `align`.
    ///
    /// Out-of-bounds indexes are clamped to the last item. An empty list always yields `0`.
    pub fn scroll_to_index_offset(
        &self,
        index: usize,
        align: Align,
        current_offset: u64,
        viewport_extent: u32,
    ) -> u64 {
        if self.count == 0 {
            return 0;
        }
        let index = index.min(self.count - 1);
        let start = self.unchecked_position(index);
        let size = self.item_extent.get() as u64;
        let end = start.saturating_add(size);
        let view = viewport_extent as u64;

        let target = match align {
            Align::Start => start,
            Align::End => end.saturating_sub(view),
            Align::Center => start.saturating_add(size / 2).saturating_sub(view / 2),
            Align::Auto => {
                let cur_end = current_offset.saturating_add(view);
                if start >= current_offset && end <= cur_end {
                    current_offset
                } else if start < current_offset {
                    start
                } else {
                    end.saturating_sub(view)
                }
            }
        };

        self.clamp_offset(target, viewport_extent)
    }

    fn unchecked_position(&self, index: usize) -> u64 {
        (index as u64).saturating_mul(self.item_extent.get() as u64)
    }
}
