//! Adapter utilities for the `scrubline` crate.
//!
//! The `scrubline` crate is UI-agnostic and only maps progress to style state. This crate
//! provides the framework-neutral pieces a render layer needs around it:
//!
//! - Scroll tracking: viewport pinning and scroll offset to progress, with bounded-lag scrubbing
//! - An element registry and a ledger of applied styles, reverted on teardown
//! - A mount lifecycle with cancellable engine initialization and static fallbacks
//!
//! The render layer itself is abstracted behind the [`Host`] trait (no DOM or widget bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod host;
mod key;
mod lifecycle;
mod registry;
mod tracker;
mod tween;


pub use host::{Host, HostEvent, ListenerId, Property, PropertyKind, Slot};
pub use lifecycle::{
    EngineError, Fallback, InitOutcome, Lifecycle, MountGuard, MountOptions, PendingInit, Phase,
};
pub use registry::{ElementRegistry, RegistryError, StyleLedger};
pub use scrubline::Easing;
pub use tracker::{PinState, ScrollTracker, TrackerOptions, Viewport};
pub use tween::Tween;
