//! Top-level error type, classification and context helpers.

use core::fmt;

use crate::{ConfigError, ValidationError};

/// Any error a Rumble host can observe.
///
/// Ticks never produce one; these come from configuration loading and the
/// diagnostic recorder.
#[derive(Debug, thiserror::Error)]
pub enum RumbleError {
    /// The configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A configuration value is out of bounds or malformed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Filesystem failure outside configuration loading
    #[error("Filesystem error: {0}")]
    Io(#[source] std::io::Error),

    /// Wrapped error carrying an operation context
    #[error("{0}")]
    Other(String),
}

impl RumbleError {
    /// Subsystem that raised the error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            RumbleError::Config(_) => ErrorCategory::Config,
            RumbleError::Validation(_) => ErrorCategory::Validation,
            RumbleError::Io(_) => ErrorCategory::Filesystem,
            RumbleError::Other(_) => ErrorCategory::Other,
        }
    }

    /// Impact on the running pipeline.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RumbleError::Config(e) => e.severity(),
            RumbleError::Validation(e) => e.severity(),
            // only the diagnostic log touches the filesystem, and it switches itself off
            RumbleError::Io(_) => ErrorSeverity::Degraded,
            RumbleError::Other(_) => ErrorSeverity::Rejected,
        }
    }

    /// `false` only when the pipeline cannot be started at all.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Fatal
    }

    /// Free-form error, mostly for hosts wrapping their own failures.
    pub fn other(msg: impl Into<String>) -> Self {
        RumbleError::Other(msg.into())
    }
}

impl From<std::io::Error> for RumbleError {
    fn from(source: std::io::Error) -> Self {
        RumbleError::Io(source)
    }
}

/// Which edge of the system produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Reading or parsing a configuration file
    Config,
    /// A value failed a field check
    Validation,
    /// Diagnostic log directory or file
    Filesystem,
    /// Anything wrapped through [`ResultExt`]
    Other,
}

impl ErrorCategory {
    /// Lower-case name used in log fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Config => "config",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Filesystem => "filesystem",
            ErrorCategory::Other => "other",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an error affects the running pipeline, least severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// An optional feature switched itself off; signals keep flowing
    Degraded,
    /// The requested change was refused and the previous state kept
    Rejected,
    /// The pipeline cannot be created
    Fatal,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorSeverity::Degraded => "degraded",
            ErrorSeverity::Rejected => "rejected",
            ErrorSeverity::Fatal => "fatal",
        })
    }
}

/// Operation name plus `key=value` details, rendered as `op (k=v, k=v)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// What was being attempted
    pub operation: String,
    /// Extra `key=value` details in insertion order
    pub fields: Vec<(String, String)>,
}

impl ErrorContext {
    /// Context with no fields.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            fields: Vec::new(),
        }
    }

    /// Append a detail.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.operation)?;
        if self.fields.is_empty() {
            return Ok(());
        }
        let details: Vec<String> = self.fields.iter().map(|(k, v)| format!("{k}={v}")).collect();
        write!(f, " ({})", details.join(", "))
    }
}

/// Attach an [`ErrorContext`] while converting into [`RumbleError`].
pub trait ResultExt<T> {
    /// Wrap the error as [`RumbleError::Other`] prefixed with `ctx`.
    fn context(self, ctx: ErrorContext) -> Result<T, RumbleError>;

    /// Shorthand for a context with only an operation name.
    fn with_context(self, operation: impl Into<String>) -> Result<T, RumbleError>;
}

impl<T, E: Into<RumbleError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, ctx: ErrorContext) -> Result<T, RumbleError> {
        self.map_err(|e| RumbleError::Other(format!("{ctx}: {}", e.into())))
    }

    fn with_context(self, operation: impl Into<String>) -> Result<T, RumbleError> {
        self.context(ErrorContext::new(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_orders_by_impact() {
        assert!(ErrorSeverity::Degraded < ErrorSeverity::Rejected);
        assert!(ErrorSeverity::Rejected < ErrorSeverity::Fatal);
    }

    #[test]
    fn test_filesystem_errors_only_degrade() {
        let err: RumbleError = std::io::Error::other("disk full").into();
        assert_eq!(err.category(), ErrorCategory::Filesystem);
        assert_eq!(err.severity(), ErrorSeverity::Degraded);
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_with_context_prefixes_operation() {
        let result: std::result::Result<(), ValidationError> =
            Err(ValidationError::required("signal_prefix"));
        let msg = result
            .with_context("load_config")
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert_eq!(
            msg,
            "load_config: Validation error: Required field 'signal_prefix' is missing"
        );
    }
}
