//! A headless scroll-scrubbed timeline sequencer.
//!
//! For scroll tracking, viewport pinning and the mount/unmount lifecycle, see the
//! `scrubline-adapter` crate.
//!
//! This crate holds the pure core of a scroll-driven "experience timeline": a sequence of items
//! that cross-fade into one another as a scalar progress value moves from `0` to `n - 1`, with a
//! side navigation list and a progress fill kept in sync.
//!
//! It is UI-agnostic. A render layer is expected to provide:
//! - the item count (and, optionally, the entries for labels/fallbacks)
//! - a progress value (usually derived from scroll by the adapter crate)
//!
//! and to apply the resulting [`Frame`] (or its [`Appearance`]-mapped attributes).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod easing;
mod entry;
mod interpolate;
mod options;
mod present;
mod timeline;
mod types;

#[cfg(test)]
mod tests;

pub use easing::Easing;
pub use entry::{RichText, TextBlock, TimelineEntry};
pub use interpolate::{interpolate, interpolate_into};
pub use options::{OptionsError, Segment, TimelineOptions, WindowOffsets};
pub use present::{
    Appearance, BoxShadow, FillAttributes, ItemAttributes, NavAttributes, Rgba, ShadowLayer,
};
pub use timeline::{Ramp, Timeline, TransitionWindow};
pub use types::{Frame, ItemStyle, NavStyle};
