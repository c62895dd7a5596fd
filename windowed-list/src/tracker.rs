use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp;

use crate::{ScrollDirection, ScrollState};

/// How the tracker turns raw position signals into deliveries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Coalesce {
    /// Every change is delivered as soon as it is observed.
    #[default]
    Immediate,
    /// Changes are held until [`ScrollTracker::flush_frame`], which delivers only the latest state.
    ///
    /// Call `flush_frame` once per display refresh to cap recomputation at one per frame.
    PerFrame,
}

/// The capability a hosting scroll surface exposes to the tracker.
///
/// Returning `None` means the host cannot observe the value right now. The tracker then keeps
/// its last known state and reports itself as degraded.
pub trait ScrollSource {
    fn current_offset(&self) -> Option<u64>;

    fn viewport_extent(&self) -> Option<u32> {
        None
    }
}

/// A callback fired with the latest scroll state on every delivery.
pub type ScrollListener = Arc<dyn Fn(ScrollState) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Observes position and size changes of a scroll surface and publishes the latest state.
///
/// Only the most recent state is ever delivered; intermediate samples produced during a burst
/// may be dropped. Each delivering method returns the delivered state (or `None` when nothing
/// was delivered) so the owner can recompute its window synchronously.
#[derive(Clone)]
pub struct ScrollTracker {
    state: ScrollState,
    direction: Option<ScrollDirection>,
    coalesce: Coalesce,
    listeners: Vec<(SubscriptionId, ScrollListener)>,
    next_id: u64,
    dirty: bool,
    batch_depth: usize,
    degraded: bool,
    deliveries: u64,
}

impl ScrollTracker {
    pub fn new(initial: ScrollState, coalesce: Coalesce) -> Self {
        Self {
            state: initial,
            direction: None,
            coalesce,
            listeners: Vec::new(),
            next_id: 0,
            dirty: false,
            batch_depth: 0,
            degraded: false,
            deliveries: 0,
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn offset(&self) -> u64 {
        self.state.offset
    }

    pub fn viewport_extent(&self) -> u32 {
        self.state.viewport_extent
    }

    pub fn direction(&self) -> Option<ScrollDirection> {
        self.direction
    }

    pub fn coalesce(&self) -> Coalesce {
        self.coalesce
    }

    /// Switches delivery mode. Leaving `PerFrame` delivers any held change immediately.
    pub fn set_coalesce(&mut self, coalesce: Coalesce) -> Option<ScrollState> {
        self.coalesce = coalesce;
        self.maybe_deliver()
    }

    /// Whether a change is waiting for the next [`Self::flush_frame`].
    pub fn has_pending(&self) -> bool {
        self.dirty
    }

    /// Whether the surface position is currently unobservable.
    ///
    /// Set by a failed `poll` or `mark_degraded`; cleared by the next observation, polled or
    /// pushed.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Total number of deliveries since construction.
    pub fn deliveries(&self) -> u64 {
        self.deliveries
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(ScrollState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Records a new scroll offset (user wheel/drag or programmatic scroll).
    pub fn on_position_change(&mut self, offset: u64) -> Option<ScrollState> {
        self.observed();
        if self.state.offset == offset {
            return None;
        }
        self.direction = match offset.cmp(&self.state.offset) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.direction,
        };
        self.state.offset = offset;
        self.dirty = true;
        self.maybe_deliver()
    }

    /// Records a new viewport extent (container resize).
    pub fn on_resize(&mut self, viewport_extent: u32) -> Option<ScrollState> {
        self.observed();
        if self.state.viewport_extent == viewport_extent {
            return None;
        }
        self.state.viewport_extent = viewport_extent;
        self.dirty = true;
        self.maybe_deliver()
    }

    /// Applies offset and extent together, delivering at most once.
    pub fn apply(&mut self, state: ScrollState) -> Option<ScrollState> {
        self.batch_update(|t| {
            t.on_resize(state.viewport_extent);
            t.on_position_change(state.offset);
        })
    }

    /// Groups several updates into a single delivery.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) -> Option<ScrollState> {
        self.batch_depth = self.batch_depth.saturating_add(1);
        f(self);
        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);
        self.maybe_deliver()
    }

    /// Pulls the current geometry from `source`.
    ///
    /// If the source cannot report an offset, the last known state is kept and the tracker is
    /// marked degraded; nothing is delivered.
    pub fn poll(&mut self, source: &(impl ScrollSource + ?Sized)) -> Option<ScrollState> {
        let Some(offset) = source.current_offset() else {
            if !self.degraded {
                wwarn!(
                    offset = self.state.offset,
                    "ScrollTracker: scroll position unavailable, keeping last known state"
                );
            }
            self.degraded = true;
            return None;
        };
        let extent = source.viewport_extent();
        self.batch_update(|t| {
            if let Some(extent) = extent {
                t.on_resize(extent);
            }
            t.on_position_change(offset);
        })
    }

    /// Marks the surface as unobservable without polling it.
    pub fn mark_degraded(&mut self) {
        if !self.degraded {
            wwarn!(offset = self.state.offset, "ScrollTracker: marked degraded by host");
        }
        self.degraded = true;
    }

    /// Delivers the latest held state, if any. Intended to run once per display refresh.
    pub fn flush_frame(&mut self) -> Option<ScrollState> {
        if !self.dirty || self.batch_depth > 0 {
            return None;
        }
        Some(self.deliver())
    }

    fn observed(&mut self) {
        if self.degraded {
            wdebug!(
                offset = self.state.offset,
                "ScrollTracker: scroll position observable again"
            );
            self.degraded = false;
        }
    }

    fn maybe_deliver(&mut self) -> Option<ScrollState> {
        if !self.dirty || self.batch_depth > 0 || self.coalesce == Coalesce::PerFrame {
            return None;
        }
        Some(self.deliver())
    }

    fn deliver(&mut self) -> ScrollState {
        self.dirty = false;
        self.deliveries = self.deliveries.saturating_add(1);
        let state = self.state;
        wtrace!(
            offset = state.offset,
            viewport_extent = state.viewport_extent,
            listeners = self.listeners.len(),
            "ScrollTracker: deliver"
        );
        for (_, listener) in &self.listeners {
            listener(state);
        }
        state
    }
}

impl core::fmt::Debug for ScrollTracker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollTracker")
            .field("state", &self.state)
            .field("direction", &self.direction)
            .field("coalesce", &self.coalesce)
            .field("listeners", &self.listeners.len())
            .field("dirty", &self.dirty)
            .field("degraded", &self.degraded)
            .field("deliveries", &self.deliveries)
            .finish_non_exhaustive()
    }
}
