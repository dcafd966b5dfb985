//! A headless viewport height stabilizer.
//!
//! Mobile browsers report a fluctuating viewport height while on-screen chrome (address bars,
//! virtual keyboards) slides in and out. This crate decides, for every candidate measurement,
//! whether the change is a genuine layout event (rotation, real resize) or transient noise, and
//! whether to publish the new height immediately, after a short debounce, or not at all.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - raw viewport readings ([`MeasurementSources`])
//! - pointer modality changes
//! - a monotonic clock (`now_ms`) and animation-frame callbacks
//! - a [`Publisher`] that writes the published unit properties
//!
//! For listener wiring, page lifecycle and the native-unit capability gate, see the
//! `viewport-stabilizer-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod classify;
mod error;
mod measure;
mod options;
mod publish;
mod schedule;
mod stabilizer;
mod types;


/// Custom property tracking the committed height exactly.
pub const VIEWPORT_UNIT_PROPERTY: &str = "--viewport-unit";
/// Custom property that never drops below the locked floor.
pub const VIEWPORT_EFFECTS_UNIT_PROPERTY: &str = "--viewport-effects-unit";
/// Event name hosts dispatch for [`HeightChange`] notifications.
pub const VIEWPORT_HEIGHT_EVENT: &str = "viewportheightchange";
/// Global key hosts may mirror [`SharedHeight`] into.
pub const VIEWPORT_HEIGHT_STATE_KEY: &str = "__viewportHeightPx";

pub use classify::{ChangeKind, Classification, classify};
pub use error::OptionsError;
pub use measure::{MeasurementSources, pick_dimension};
pub use options::{
    COARSE_HEIGHT_CHANGE_THRESHOLD, COARSE_WIDTH_THRESHOLD, FINE_HEIGHT_DECREASE_THRESHOLD,
    FINE_HEIGHT_INCREASE_THRESHOLD, FINE_WIDTH_THRESHOLD, HEIGHT_UPDATE_DELAY_MS,
    KEYBOARD_VIEWPORT_RATIO, OnHeightChangeCallback, StabilizerOptions, Thresholds,
    VISUAL_VIEWPORT_TOLERANCE,
};
pub use publish::{NullPublisher, Publisher, SharedHeight, to_viewport_unit};
pub use schedule::{Debounce, FrameRequest, Timer};
pub use stabilizer::{Outcome, Stabilizer};
pub use types::{
    Baseline, HeightChange, Orientation, PendingUpdate, Pointer, UnitProperty, ViewportSample,
};
