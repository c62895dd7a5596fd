//! List surface utilities for the `windowed-list` crate.
//!
//! The `windowed-list` crate is UI-agnostic and focuses on the window math and scroll state.
//! This crate provides the framework-neutral layer a host needs on top of it:
//!
//! - [`ListSurface`]: wires scroll/resize signals to the window, renders only the items in the
//!   current window and reports which keyed elements entered or left since the last frame
//! - [`OrderingPipeline`]: case-insensitive filtering and stable sorting of the source
//!   collection, producing an [`Ordered`] view the surface renders from
//!
//! This crate is intentionally framework-agnostic (no DOM/ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod ordering;
mod source;
mod surface;


pub use ordering::{
    Comparator, Ordered, OrderingError, OrderingPipeline, Query, SortDirection, SortSpec,
    TextField,
};
pub use source::ItemSource;
pub use surface::{Frame, ListSurface, OnScrollCallback, RenderFn, RenderedItem};
