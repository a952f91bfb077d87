//! Prelude for the filters crate.
//!
//! ```
//! use rumble_filters::prelude::*;
//!
//! let gate = ramp(0.06, 0.01, 0.10);
//! assert!((gate - 0.5).abs() < 1e-12);
//! ```

pub use crate::follower::{
    AsymmetricFollower, DualRateSmoother, Envelope, EnvelopeFollower, attack_decay,
};
pub use crate::primitives::{
    SNAP_EPSILON, clamp_signed, clamp01, lerp, normalize_range, ramp, shape, smooth, smoothstep,
    snap_to_zero,
};
pub use crate::slew_rate::limit_rise;
