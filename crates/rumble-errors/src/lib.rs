//! Error types for the Rumble haptic telemetry pipeline
//!
//! The per-tick pipeline never fails: missing channels fall back, non-finite
//! intermediates collapse to zero and every output is clamped. Errors therefore
//! only exist at the edges of the system, where configuration is loaded and
//! validated or where the optional diagnostic recorder touches the filesystem.
//!
//! - [`common`]: top-level [`RumbleError`], severity and context helpers
//! - [`config`]: configuration loading errors
//! - [`validation`]: field and range validation errors
//!
//! # Example
//!
//! ```
//! use rumble_errors::prelude::*;
//!
//! fn check_gain(value: f64) -> Result<f64> {
//!     if !(0.0..=4.0).contains(&value) {
//!         return Err(ValidationError::out_of_range("gains.global", value, 0.0, 4.0).into());
//!     }
//!     Ok(value)
//! }
//!
//! assert!(check_gain(1.0).is_ok());
//! assert!(check_gain(9.0).is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod common;
pub mod config;
pub mod prelude;
pub mod validation;

pub use common::{ErrorCategory, ErrorContext, ErrorSeverity, ResultExt, RumbleError};
pub use config::ConfigError;
pub use validation::ValidationError;

/// A specialized `Result` type for Rumble operations.
pub type Result<T> = std::result::Result<T, RumbleError>;
