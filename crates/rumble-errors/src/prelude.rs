//! Everything a host needs to handle pipeline errors.
//!
//! ```
//! use rumble_errors::prelude::*;
//!
//! fn master_gain(raw: f64) -> Result<f64> {
//!     Ok(ValidationError::ensure_within("gains.global", raw, 0.0, 4.0)?)
//! }
//!
//! assert!(master_gain(1.2).is_ok());
//! assert!(master_gain(f64::NAN).is_err());
//! ```

pub use crate::{
    Result,
    common::{ErrorCategory, ErrorContext, ErrorSeverity, ResultExt, RumbleError},
    config::ConfigError,
    validation::ValidationError,
};
