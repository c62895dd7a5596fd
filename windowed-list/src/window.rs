use alloc::vec::Vec;

use crate::range::{compute_range, compute_viewport_range};
use crate::{
    Align, ConfigError, ItemExtent, ItemPositioner, ScrollSource, ScrollState, ScrollTracker,
    VisibleItem, VisibleRange, WindowOptions,
};

/// A headless windowing engine for fixed-extent lists.
///
/// This type is UI-agnostic:
/// - It does not hold the items; only their count.
/// - Your surface drives it by reporting scroll offsets and viewport resizes.
/// - The visible range is never stored. Every query recomputes it from the current scroll
///   state, item extent, count and overscan.
///
/// For render coordination and keyed reconciliation, see the `windowed-list-surface` crate.
#[derive(Clone, Debug)]
pub struct ListWindow {
    options: WindowOptions,
    positioner: ItemPositioner,
    tracker: ScrollTracker,
}

impl ListWindow {
    /// Creates a window over `count` items.
    ///
    /// Fails if the item extent or the initial viewport extent is zero.
    pub fn new(options: WindowOptions, count: usize) -> Result<Self, ConfigError> {
        let item_extent = options.validate()?;
        wdebug!(
            count,
            item_extent = options.item_extent,
            viewport_extent = options.viewport_extent,
            overscan = options.overscan,
            "ListWindow::new"
        );
        let initial = ScrollState::new(options.initial_offset, options.viewport_extent);
        Ok(Self {
            positioner: ItemPositioner::new(item_extent, count),
            tracker: ScrollTracker::new(initial, options.coalesce),
            options,
        })
    }

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    pub fn count(&self) -> usize {
        self.positioner.count()
    }

    pub fn item_extent(&self) -> ItemExtent {
        self.positioner.item_extent()
    }

    pub fn overscan(&self) -> usize {
        self.options.overscan
    }

    pub fn enabled(&self) -> bool {
        self.options.enabled
    }

    /// Replaces the item count, e.g. after the collection was filtered.
    ///
    /// The scroll offset is kept as-is; the range is clamped to the new count on the next query.
    pub fn set_count(&mut self, count: usize) {
        if self.positioner.count() == count {
            return;
        }
        wtrace!(count, "ListWindow::set_count");
        self.positioner = ItemPositioner::new(self.positioner.item_extent(), count);
    }

    pub fn set_item_extent(&mut self, item_extent: u32) -> Result<(), ConfigError> {
        let extent = ItemExtent::new(item_extent)?;
        self.options.item_extent = item_extent;
        self.positioner = ItemPositioner::new(extent, self.positioner.count());
        Ok(())
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.options.overscan = overscan;
    }

    /// A disabled window reports no visible range. Geometry queries are unaffected.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.options.enabled = enabled;
    }

    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut ScrollTracker {
        &mut self.tracker
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.tracker.state()
    }

    pub fn scroll_offset(&self) -> u64 {
        self.tracker.offset()
    }

    pub fn viewport_extent(&self) -> u32 {
        self.tracker.viewport_extent()
    }

    /// Reports a scroll offset from the surface. Returns the delivered state, if any.
    pub fn on_scroll(&mut self, offset: u64) -> Option<ScrollState> {
        self.tracker.on_position_change(offset)
    }

    /// Same as `on_scroll`, but clamps the offset to the scrollable extent first.
    pub fn on_scroll_clamped(&mut self, offset: u64) -> Option<ScrollState> {
        let clamped = self.clamp_offset(offset);
        self.tracker.on_position_change(clamped)
    }

    pub fn on_resize(&mut self, viewport_extent: u32) -> Option<ScrollState> {
        self.tracker.on_resize(viewport_extent)
    }

    pub fn poll(&mut self, source: &(impl ScrollSource + ?Sized)) -> Option<ScrollState> {
        self.tracker.poll(source)
    }

    pub fn flush_frame(&mut self) -> Option<ScrollState> {
        self.tracker.flush_frame()
    }

    /// Restores a previously captured scroll state (offset and viewport together).
    pub fn restore_scroll_state(&mut self, state: ScrollState) -> Option<ScrollState> {
        self.tracker.apply(state)
    }

    /// The overscanned window for the current scroll state.
    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.visible_range_for(self.tracker.state())
    }

    pub fn visible_range_for(&self, state: ScrollState) -> Option<VisibleRange> {
        if !self.options.enabled {
            return None;
        }
        compute_range(
            state.offset,
            state.viewport_extent,
            self.positioner.item_extent(),
            self.positioner.count(),
            self.options.overscan,
        )
    }

    /// The items that intersect the viewport, without overscan.
    pub fn viewport_range(&self) -> Option<VisibleRange> {
        if !self.options.enabled {
            return None;
        }
        let state = self.tracker.state();
        compute_viewport_range(
            state.offset,
            state.viewport_extent,
            self.positioner.item_extent(),
            self.positioner.count(),
        )
    }

    pub fn position_of(&self, index: usize) -> Option<u64> {
        self.positioner.position_of(index)
    }

    /// `count × item_extent`, whether or not the window is enabled.
    pub fn total_extent(&self) -> u64 {
        self.positioner.total_extent()
    }

    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        self.positioner.index_at_offset(offset)
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.positioner.max_scroll_offset(self.viewport_extent())
    }

    pub fn clamp_offset(&self, offset: u64) -> u64 {
        self.positioner.clamp_offset(offset, self.viewport_extent())
    }

    pub fn for_each_visible_item(&self, mut f: impl FnMut(VisibleItem)) {
        let Some(range) = self.visible_range() else {
            return;
        };
        for index in range.indices() {
            if let Some(item) = self.positioner.item(index) {
                f(item);
            }
        }
    }

    /// Collects the visible items into `out` (clears `out` first).
    ///
    /// Prefer `for_each_visible_item` with a reused scratch buffer on hot paths.
    pub fn collect_visible_items(&self, out: &mut Vec<VisibleItem>) {
        out.clear();
        self.for_each_visible_item(|it| out.push(it));
    }

    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        self.positioner.scroll_to_index_offset(
            index,
            align,
            self.scroll_offset(),
            self.viewport_extent(),
        )
    }

    /// Programmatically scrolls to an index and returns the applied (clamped) offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.tracker.on_position_change(offset);
        offset
    }
}
