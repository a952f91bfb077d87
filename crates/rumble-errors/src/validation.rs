//! Field-level checks on pipeline configuration values.

use core::fmt;

use crate::common::ErrorSeverity;

/// A configuration value that failed a field check.
///
/// Numeric bounds are stored pre-rendered so the error stays `Clone` and
/// comparable regardless of the numeric type that was checked.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Outside the inclusive bounds `[min, max]`
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Dotted field path, e.g. `gains.abs`
        field: String,
        /// Rejected value
        value: String,
        /// Lower bound
        min: String,
        /// Upper bound
        max: String,
    },

    /// Empty or whitespace-only
    #[error("Required field '{0}' is missing")]
    Required(String),

    /// NaN or infinite
    #[error("Field '{0}' must be a finite number")]
    NonFinite(String),

    /// Present but unusable, e.g. a signal prefix containing a separator
    #[error("Invalid format for field '{field}': {reason}")]
    InvalidFormat {
        /// Dotted field path
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

impl ValidationError {
    /// Rejected values leave the running configuration untouched.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Rejected
    }

    /// Build a [`ValidationError::OutOfRange`] from any debug-printable bounds.
    pub fn out_of_range<T: fmt::Debug>(field: impl Into<String>, value: T, min: T, max: T) -> Self {
        let render = |v: &T| format!("{v:?}");
        ValidationError::OutOfRange {
            field: field.into(),
            value: render(&value),
            min: render(&min),
            max: render(&max),
        }
    }

    /// Empty value for a mandatory field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required(field.into())
    }

    /// NaN or infinite number.
    pub fn non_finite(field: impl Into<String>) -> Self {
        ValidationError::NonFinite(field.into())
    }

    /// Malformed value with a human-readable reason.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Pass `value` through if it is finite and within `[min, max]`.
    ///
    /// NaN reports [`ValidationError::NonFinite`] rather than a range error.
    pub fn ensure_within(field: &str, value: f64, min: f64, max: f64) -> Result<f64, Self> {
        if !value.is_finite() {
            Err(Self::non_finite(field))
        } else if value < min || value > max {
            Err(Self::out_of_range(field, value, min, max))
        } else {
            Ok(value)
        }
    }

    /// Dotted path of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::OutOfRange { field, .. } | ValidationError::InvalidFormat { field, .. } => {
                field
            }
            ValidationError::Required(field) | ValidationError::NonFinite(field) => field,
        }
    }
}
