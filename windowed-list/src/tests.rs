use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }
}

fn extent(v: u32) -> ItemExtent {
    ItemExtent::new(v).unwrap()
}

fn window(count: usize, item_extent: u32, viewport_extent: u32) -> ListWindow {
    ListWindow::new(WindowOptions::new(item_extent, viewport_extent), count).unwrap()
}

/// Indexes of every item that overlaps `offset ..= offset + viewport` (brute force).
fn expected_items_in_view(
    offset: u64,
    viewport_extent: u32,
    item_extent: u32,
    count: usize,
) -> Vec<usize> {
    let h = item_extent as u64;
    let end = offset + viewport_extent as u64;
    (0..count)
        .filter(|&i| {
            let start = i as u64 * h;
            start <= end && start + h > offset
        })
        .collect()
}

struct FixedSource {
    offset: Option<u64>,
    extent: Option<u32>,
}

impl ScrollSource for FixedSource {
    fn current_offset(&self) -> Option<u64> {
        self.offset
    }

    fn viewport_extent(&self) -> Option<u32> {
        self.extent
    }
}

#[test]
fn scenario_scrolled_into_long_list() {
    let r = compute_range(700, 500, extent(70), 1000, 3).unwrap();
    assert_eq!(r.start_index, 7);
    assert_eq!(r.end_index, 20);
    assert_eq!(r.len(), 14);
}

#[test]
fn scenario_empty_collection_renders_nothing() {
    for offset in [0u64, 1, 700, u64::MAX] {
        assert_eq!(compute_range(offset, 500, extent(70), 0, 3), None);
    }

    let w = window(0, 70, 500);
    assert_eq!(w.visible_range(), None);
    assert_eq!(w.total_extent(), 0);
    let mut items = Vec::new();
    w.collect_visible_items(&mut items);
    assert!(items.is_empty());
}

#[test]
fn scenario_viewport_larger_than_content() {
    let r = compute_range(0, 1000, extent(100), 5, 3).unwrap();
    assert_eq!(r.start_index, 0);
    assert_eq!(r.end_index, 4);
}

#[test]
fn zero_offset_always_starts_at_first_item() {
    for overscan in 0..10 {
        let r = compute_range(0, 300, extent(30), 50, overscan).unwrap();
        assert_eq!(r.start_index, 0);
    }
}

#[test]
fn viewport_reaching_the_end_includes_last_item() {
    // n * h = 400; offset + viewport = 400.
    let r = compute_range(300, 100, extent(40), 10, 0).unwrap();
    assert_eq!(r.end_index, 9);
    let r = compute_range(350, 100, extent(40), 10, 0).unwrap();
    assert_eq!(r.end_index, 9);
}

#[test]
fn offset_past_the_end_clamps_to_last_item() {
    let r = compute_range(10_000, 100, extent(10), 5, 2).unwrap();
    assert_eq!(r.start_index, 4);
    assert_eq!(r.end_index, 4);
}

#[test]
fn huge_inputs_saturate_instead_of_overflowing() {
    let r = compute_range(u64::MAX, u32::MAX, extent(1), usize::MAX, usize::MAX).unwrap();
    assert_eq!(r.start_index, 0);
    assert_eq!(r.end_index, usize::MAX - 1);
}

#[test]
fn compute_range_is_idempotent() {
    let a = compute_range(1234, 321, extent(17), 999, 4);
    let b = compute_range(1234, 321, extent(17), 999, 4);
    assert_eq!(a, b);

    // An unrelated call in between does not change the answer.
    let _ = compute_range(0, 1, extent(1), 1, 0);
    assert_eq!(compute_range(1234, 321, extent(17), 999, 4), a);
}

#[test]
fn randomized_ranges_hold_bounds_and_cover_viewport() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..2_000 {
        let count = rng.gen_range_usize(0, 200);
        let item_extent = rng.gen_range_u32(1, 90);
        let viewport = rng.gen_range_u32(1, 2_000);
        let overscan = rng.gen_range_usize(0, 8);
        let total = count as u64 * item_extent as u64;
        let offset = rng.gen_range_u64(0, total + 500);

        let r = compute_range(offset, viewport, extent(item_extent), count, overscan);
        if count == 0 {
            assert_eq!(r, None);
            continue;
        }
        let r = r.unwrap();
        assert!(r.start_index <= r.end_index, "inverted range {r:?}");
        assert!(r.end_index <= count - 1, "range past the end {r:?} (count={count})");

        for i in expected_items_in_view(offset, viewport, item_extent, count) {
            assert!(
                r.contains(i),
                "item {i} is in view but outside {r:?} (offset={offset}, viewport={viewport}, h={item_extent})"
            );
        }

        if offset < total {
            let strict =
                compute_viewport_range(offset, viewport, extent(item_extent), count).unwrap();
            assert_eq!(r.start_index, strict.start_index.saturating_sub(overscan));
            assert_eq!(
                r.end_index,
                strict.end_index.saturating_add(overscan).min(count - 1)
            );
        } else {
            assert_eq!(r.end_index, count - 1);
        }
    }
}

#[test]
fn positions_and_total_extent_are_exact() {
    let mut rng = Lcg::new(42);
    for _ in 0..200 {
        let count = rng.gen_range_usize(0, 5_000);
        let h = rng.gen_range_u32(1, 500);
        let p = ItemPositioner::new(extent(h), count);
        assert_eq!(p.total_extent(), count as u64 * h as u64);
        if count > 0 {
            let i = rng.gen_range_usize(0, count);
            assert_eq!(p.position_of(i), Some(i as u64 * h as u64));
            assert_eq!(p.index_at_offset(i as u64 * h as u64), Some(i));
        }
        assert_eq!(p.position_of(count), None);
    }
}

#[test]
fn visible_items_are_aligned_to_their_index() {
    let mut w = window(1000, 70, 500);
    w.on_scroll(700);
    let mut items = Vec::new();
    w.collect_visible_items(&mut items);
    assert_eq!(items.len(), 14);
    assert_eq!(items[0].index, 7);
    for it in &items {
        assert_eq!(it.offset, it.index as u64 * 70);
        assert_eq!(it.extent, 70);
        assert_eq!(it.end(), it.offset + 70);
    }
    assert_eq!(w.total_extent(), 70_000);
}

#[test]
fn zero_item_extent_is_rejected_at_construction() {
    assert_eq!(ItemExtent::new(0), Err(ConfigError::ZeroItemExtent));
    let err = ListWindow::new(WindowOptions::new(0, 500), 10).unwrap_err();
    assert_eq!(err, ConfigError::ZeroItemExtent);

    let mut w = window(10, 20, 100);
    assert_eq!(w.set_item_extent(0), Err(ConfigError::ZeroItemExtent));
    // The previous extent survives a rejected update.
    assert_eq!(w.item_extent().get(), 20);
    assert_eq!(w.total_extent(), 200);
}

#[test]
fn zero_viewport_is_rejected_at_construction_but_tolerated_at_runtime() {
    let err = ListWindow::new(WindowOptions::new(10, 0), 10).unwrap_err();
    assert_eq!(err, ConfigError::ZeroViewportExtent);

    let mut w = window(100, 10, 50);
    w.on_resize(0);
    let r = w.visible_range().unwrap();
    assert!(r.start_index <= r.end_index);
    assert!(r.end_index < 100);
}

#[test]
fn default_overscan_is_three() {
    let opts = WindowOptions::new(10, 100);
    assert_eq!(opts.overscan, DEFAULT_OVERSCAN);
    assert_eq!(opts.overscan, 3);
}

#[test]
fn item_extent_change_recomputes_range() {
    let mut w = window(1000, 10, 100);
    w.on_scroll(1000);
    assert_eq!(w.viewport_range().unwrap().start_index, 100);
    w.set_item_extent(20).unwrap();
    assert_eq!(w.viewport_range().unwrap().start_index, 50);
    assert_eq!(w.total_extent(), 20_000);
}

#[test]
fn shrinking_count_keeps_offset_and_clamps_range() {
    let mut w = window(1000, 10, 100);
    w.on_scroll(5_000);
    w.set_count(20);
    assert_eq!(w.scroll_offset(), 5_000);
    let r = w.visible_range().unwrap();
    assert_eq!(r.end_index, 19);
    assert!(r.start_index <= r.end_index);

    w.set_count(0);
    assert_eq!(w.visible_range(), None);
}

#[test]
fn disabled_window_hides_range_but_keeps_geometry() {
    let mut w = window(100, 10, 50);
    w.set_enabled(false);
    assert!(!w.enabled());
    assert_eq!(w.visible_range(), None);
    assert_eq!(w.viewport_range(), None);
    let mut items = Vec::new();
    w.collect_visible_items(&mut items);
    assert!(items.is_empty());

    // The spacer still spans every item, and clamping agrees with it.
    assert_eq!(w.total_extent(), 1_000);
    assert_eq!(w.position_of(7), Some(70));
    assert_eq!(w.index_at_offset(75), Some(7));
    assert_eq!(w.max_scroll_offset(), w.total_extent() - 50);
    assert_eq!(w.clamp_offset(5_000), 950);
    assert_eq!(w.on_scroll_clamped(5_000), Some(ScrollState::new(950, 50)));

    w.set_enabled(true);
    assert_eq!(w.visible_range().unwrap().end_index, 99);
}

#[test]
fn scroll_to_index_respects_alignment_and_clamps() {
    let mut w = window(100, 10, 50);
    assert_eq!(w.scroll_to_index_offset(20, Align::Start), 200);
    assert_eq!(w.scroll_to_index_offset(20, Align::End), 160);
    assert_eq!(w.scroll_to_index_offset(20, Align::Center), 180);
    // Already fully visible: Auto keeps the current offset.
    assert_eq!(w.scroll_to_index_offset(2, Align::Auto), 0);
    assert_eq!(w.scroll_to_index_offset(20, Align::Auto), 160);
    // Past the end clamps to the max scroll offset.
    assert_eq!(w.scroll_to_index_offset(10_000, Align::Start), 950);

    let applied = w.scroll_to_index(50, Align::Start);
    assert_eq!(applied, 500);
    assert_eq!(w.scroll_offset(), 500);
    assert_eq!(w.scroll_to_index_offset(40, Align::Auto), 400);
}

#[test]
fn clamped_scroll_stays_within_content() {
    let mut w = window(10, 10, 40);
    w.on_scroll_clamped(1_000);
    assert_eq!(w.scroll_offset(), 60);
    assert_eq!(w.max_scroll_offset(), 60);
}

#[test]
fn tracker_delivers_latest_state_immediately() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut t = ScrollTracker::new(ScrollState::new(0, 100), Coalesce::Immediate);
    let sink = Arc::clone(&seen);
    t.subscribe(move |s| sink.lock().unwrap().push(s));

    assert_eq!(t.on_position_change(10), Some(ScrollState::new(10, 100)));
    assert_eq!(t.on_position_change(10), None, "unchanged offset must not deliver");
    assert_eq!(t.on_resize(200), Some(ScrollState::new(10, 200)));

    let seen = seen.lock().unwrap();
    assert_eq!(
        seen.as_slice(),
        &[ScrollState::new(10, 100), ScrollState::new(10, 200)]
    );
    assert_eq!(t.deliveries(), 2);
}

#[test]
fn tracker_tracks_scroll_direction() {
    let mut t = ScrollTracker::new(ScrollState::new(50, 100), Coalesce::Immediate);
    assert_eq!(t.direction(), None);
    t.on_position_change(80);
    assert_eq!(t.direction(), Some(ScrollDirection::Forward));
    t.on_position_change(20);
    assert_eq!(t.direction(), Some(ScrollDirection::Backward));
}

#[test]
fn tracker_unsubscribe_stops_delivery() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut t = ScrollTracker::new(ScrollState::new(0, 100), Coalesce::Immediate);
    let c = Arc::clone(&calls);
    let id = t.subscribe(move |_| {
        c.fetch_add(1, Ordering::Relaxed);
    });
    t.on_position_change(1);
    assert!(t.unsubscribe(id));
    assert!(!t.unsubscribe(id));
    t.on_position_change(2);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn tracker_batch_delivers_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut t = ScrollTracker::new(ScrollState::new(0, 100), Coalesce::Immediate);
    let c = Arc::clone(&calls);
    t.subscribe(move |_| {
        c.fetch_add(1, Ordering::Relaxed);
    });

    let delivered = t.batch_update(|t| {
        t.on_position_change(5);
        t.on_position_change(6);
        t.on_resize(300);
    });
    assert_eq!(delivered, Some(ScrollState::new(6, 300)));
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    // Nothing changed: no delivery.
    assert_eq!(t.apply(ScrollState::new(6, 300)), None);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn per_frame_coalescing_delivers_only_the_latest_sample() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut t = ScrollTracker::new(ScrollState::new(0, 100), Coalesce::PerFrame);
    let sink = Arc::clone(&seen);
    t.subscribe(move |s| sink.lock().unwrap().push(s.offset));

    for offset in [10, 20, 30, 40] {
        assert_eq!(t.on_position_change(offset), None);
    }
    assert!(t.has_pending());
    assert_eq!(t.flush_frame(), Some(ScrollState::new(40, 100)));
    assert!(!t.has_pending());
    assert_eq!(t.flush_frame(), None, "a quiet frame delivers nothing");
    assert_eq!(seen.lock().unwrap().as_slice(), &[40]);
}

#[test]
fn leaving_per_frame_mode_flushes_held_change() {
    let mut t = ScrollTracker::new(ScrollState::new(0, 100), Coalesce::PerFrame);
    t.on_position_change(99);
    assert_eq!(
        t.set_coalesce(Coalesce::Immediate),
        Some(ScrollState::new(99, 100))
    );
    assert!(!t.has_pending());
}

#[test]
fn unobservable_source_freezes_last_known_state() {
    let mut w = window(1000, 10, 100);
    let live = FixedSource {
        offset: Some(300),
        extent: Some(120),
    };
    assert_eq!(w.poll(&live), Some(ScrollState::new(300, 120)));
    let before = w.visible_range();

    let dead = FixedSource {
        offset: None,
        extent: None,
    };
    assert_eq!(w.poll(&dead), None);
    assert!(w.tracker().is_degraded());
    assert_eq!(w.visible_range(), before);
    assert_eq!(w.scroll_state(), ScrollState::new(300, 120));

    assert_eq!(w.poll(&live), None, "recovered but unchanged");
    assert!(!w.tracker().is_degraded());
}

#[test]
fn pushed_observation_clears_degraded_flag() {
    let mut w = window(1000, 10, 100);
    w.tracker_mut().mark_degraded();
    assert!(w.tracker().is_degraded());
    assert_eq!(w.visible_range().map(|r| r.indices()), Some(0..=13));

    assert_eq!(w.on_scroll(5_000), Some(ScrollState::new(5_000, 100)));
    assert!(!w.tracker().is_degraded());
    assert_eq!(w.visible_range().map(|r| r.indices()), Some(497..=513));

    w.tracker_mut().mark_degraded();
    w.on_resize(100);
    assert!(!w.tracker().is_degraded(), "an unchanged observation still counts");
}

#[test]
fn degraded_tracker_delivers_nothing_until_observed() {
    let mut t = ScrollTracker::new(ScrollState::new(40, 100), Coalesce::Immediate);
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    t.subscribe(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    t.mark_degraded();
    t.mark_degraded();
    assert_eq!(t.flush_frame(), None);
    assert_eq!(t.state(), ScrollState::new(40, 100));
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    t.on_position_change(80);
    assert!(!t.is_degraded());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn per_frame_window_recomputes_after_flush() {
    let opts = WindowOptions::new(10, 100).with_coalesce(Coalesce::PerFrame);
    let mut w = ListWindow::new(opts, 1000).unwrap();
    w.on_scroll(500);
    w.on_scroll(600);
    // The range always follows the latest recorded state; coalescing only limits deliveries.
    assert_eq!(w.viewport_range().unwrap().start_index, 60);
    assert_eq!(w.flush_frame(), Some(ScrollState::new(600, 100)));
}

#[test]
fn restore_scroll_state_applies_offset_and_viewport() {
    let mut w = window(1000, 10, 100);
    let saved = ScrollState::new(4_000, 250);
    assert_eq!(w.restore_scroll_state(saved), Some(saved));
    assert_eq!(w.viewport_range().unwrap().start_index, 400);
    assert_eq!(w.viewport_range().unwrap().end_index, 425);
}

#[test]
fn key_resolver_falls_back_to_index() {
    let by_index = KeyResolver::<str, u64>::by_index();
    assert_eq!(by_index.key_of("a", 3), ItemKey::Index(3));

    let by_len = KeyResolver::<str, usize>::new(|s: &str, _| (!s.is_empty()).then(|| s.len()));
    assert_eq!(by_len.key_of("abc", 0), ItemKey::Id(3));
    assert_eq!(by_len.key_of("", 7), ItemKey::Index(7));
}

#[test]
fn key_resolver_keeps_keys_unique_within_a_set() {
    let items = ["apple", "pear", "plum", "kiwi"];
    // Identity = first letter, so "pear" and "plum" collide.
    let resolver = KeyResolver::<&str, char>::new(|s: &&str, _| s.chars().next());
    let mut keys = Vec::new();
    resolver.resolve_unique(items.iter().enumerate(), &mut keys);
    assert_eq!(
        keys,
        [
            ItemKey::Id('a'),
            ItemKey::Id('p'),
            ItemKey::Index(2),
            ItemKey::Id('k'),
        ]
    );
    let unique: KeySet<_> = keys.iter().cloned().collect();
    assert_eq!(unique.len(), keys.len());
}

#[test]
fn px_conversion_sanitizes_host_values() {
    assert_eq!(offset_from_px(-12.5), 0);
    assert_eq!(offset_from_px(f64::NAN), 0);
    assert_eq!(offset_from_px(700.9), 700);
    assert_eq!(extent_from_px(499.99), 499);
}

#[test]
fn range_helpers_agree_with_inclusive_bounds() {
    let r = VisibleRange {
        start_index: 7,
        end_index: 20,
    };
    assert_eq!(r.len(), 14);
    assert!(!r.is_empty());
    assert_eq!(r.to_exclusive(), 7..21);
    assert_eq!(r.to_exclusive().len(), r.len());
    assert_eq!(r.indices().count(), r.len());

    let items: Vec<usize> = (0..30).collect();
    assert_eq!(items[r.to_exclusive()].first(), Some(&7));
    assert_eq!(items[r.to_exclusive()].last(), Some(&20));
}

#[test]
fn scroll_state_viewport_end_saturates() {
    assert_eq!(ScrollState::new(700, 500).viewport_end(), 1_200);
    assert_eq!(ScrollState::new(u64::MAX - 1, 10).viewport_end(), u64::MAX);
}

#[test]
fn initial_offset_seeds_the_tracker() {
    let opts = WindowOptions::new(70, 500).with_initial_offset(700);
    let w = ListWindow::new(opts, 1000).unwrap();
    assert_eq!(w.scroll_offset(), 700);
    assert_eq!(w.tracker().deliveries(), 0);
    assert_eq!(
        w.visible_range(),
        Some(VisibleRange {
            start_index: 7,
            end_index: 20
        })
    );
}

#[test]
fn set_overscan_widens_the_next_range() {
    let mut w = window(1000, 10, 100);
    w.on_scroll(500);
    assert_eq!(w.visible_range().unwrap().indices(), 47..=63);
    w.set_overscan(0);
    assert_eq!(w.overscan(), 0);
    assert_eq!(w.visible_range(), w.viewport_range());
    w.set_overscan(10);
    assert_eq!(w.visible_range().unwrap().indices(), 40..=70);
}
