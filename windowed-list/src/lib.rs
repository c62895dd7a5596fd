//! A headless windowing engine for fixed-extent virtual lists.
//!
//! For render coordination (keyed reconciliation, ordering pipelines), see the
//! `windowed-list-surface` crate.
//!
//! This crate renders nothing. It answers one question at interactive frame rates: given the
//! current scroll offset, viewport extent, shared item extent, item count and overscan, which
//! items must be materialized and where do they sit inside the full-extent spacer?
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport extent (height for vertical lists)
//! - scroll offset, pushed on every position change or pulled through [`ScrollSource`]
//! - the item count of the (already filtered and sorted) collection
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod key;
mod options;
mod positioner;
mod range;
mod state;
mod tracker;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use key::{KeyFn, KeyResolver, KeySet};
pub use options::{DEFAULT_OVERSCAN, WindowOptions};
pub use positioner::ItemPositioner;
pub use range::{compute_range, compute_viewport_range};
pub use state::{ScrollState, extent_from_px, offset_from_px};
pub use tracker::{Coalesce, ScrollListener, ScrollSource, ScrollTracker, SubscriptionId};
pub use types::{Align, ItemExtent, ItemKey, ScrollDirection, VisibleItem, VisibleRange};
pub use window::ListWindow;

#[doc(hidden)]
pub use key::KeyCacheKey;
