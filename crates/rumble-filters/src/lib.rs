//! RT-Safe Signal Shaping for Rumble
//!
//! This crate provides the small numeric building blocks every haptic signal in
//! the pipeline is made of. They run once per physics tick on the host's update
//! path, so each one is a handful of arithmetic operations on plain `f64` state.
//!
//! # Overview
//!
//! - **Primitives**: total clamps, range normalization, gates, knees and the
//!   exponential [`smooth`] filter reused by every envelope
//! - **Followers**: envelope followers with structural decay, asymmetric
//!   attack/decay and dual-rate smoothing
//! - **Slew rate**: upward rate limiting that absorbs single-tick telemetry jumps
//!
//! # RT Safety Guarantees
//!
//! - No heap allocations
//! - O(1) time complexity for all operations
//! - Non-finite inputs collapse to `0.0` in every clamp and normalization
//!
//! # Example
//!
//! ```
//! use rumble_filters::prelude::*;
//!
//! let mut vibration = EnvelopeFollower::new(0.45, 0.97);
//! let level = vibration.update(clamp01(1.7));
//! assert!(level > 0.0 && level < 1.0);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod follower;
pub mod prelude;
pub mod primitives;
pub mod slew_rate;

pub use follower::{AsymmetricFollower, DualRateSmoother, Envelope, EnvelopeFollower, attack_decay};
pub use primitives::*;
pub use slew_rate::limit_rise;
