//! Host adapter for the `viewport-stabilizer` crate.
//!
//! The `viewport-stabilizer` crate is UI-agnostic and only implements the decision logic. This
//! crate provides the framework-neutral wiring every host needs around it:
//!
//! - A capability gate that skips the stabilizer entirely where a native dynamic viewport unit
//!   is available
//! - Idempotent activation and teardown of the listener set
//! - Page hide / back-forward-cache restore handling
//! - A consumer-side read of the stabilized height
//!
//! This crate does not bind to any browser API itself; hosts implement [`Host`].
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod consumer;
mod controller;
mod host;

#[cfg(test)]
mod tests;

pub use consumer::stable_viewport_height;
pub use controller::{Controller, Installation};
pub use host::{Host, Listener, Trigger};
