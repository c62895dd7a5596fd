use crate::{ItemExtent, VisibleRange};

/// Computes the inclusive window of indexes to render for a fixed-extent list.
///
/// The window covers every item that intersects `offset .. offset + viewport_extent`, widened by
/// `overscan` items on both sides and clamped to `0..=count - 1`. Returns `None` when `count` is
/// zero.
///
/// This is a pure function of its inputs: calling it twice with the same arguments yields the
/// same window, regardless of what was computed before.
pub fn compute_range(
    offset: u64,
    viewport_extent: u32,
    item_extent: ItemExtent,
    count: usize,
    overscan: usize,
) -> Option<VisibleRange> {
    if count == 0 {
        return None;
    }
    let last = count - 1;
    let extent = item_extent.get() as u64;

    let first_in_view = index_from_u64(offset / extent);
    let last_in_view = index_from_u64(offset.saturating_add(viewport_extent as u64) / extent);

    let start_index = first_in_view.saturating_sub(overscan).min(last);
    let end_index = last_in_view.saturating_add(overscan).min(last);
    debug_assert!(
        start_index <= end_index,
        "compute_range produced an inverted window ({start_index} > {end_index})"
    );

    Some(VisibleRange {
        start_index,
        end_index,
    })
}

/// Same as [`compute_range`] without overscan: the items that actually intersect the viewport.
pub fn compute_viewport_range(
    offset: u64,
    viewport_extent: u32,
    item_extent: ItemExtent,
    count: usize,
) -> Option<VisibleRange> {
    compute_range(offset, viewport_extent, item_extent, count, 0)
}

fn index_from_u64(v: u64) -> usize {
    usize::try_from(v).unwrap_or(usize::MAX)
}
