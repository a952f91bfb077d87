//! Configuration loading errors.

use std::path::PathBuf;

use crate::common::ErrorSeverity;

/// Errors raised while reading a pipeline configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The document could not be parsed
    #[error("Failed to parse {format} configuration: {reason}")]
    Parse {
        /// Document format (`yaml` or `json`)
        format: &'static str,
        /// Parser message
        reason: String,
    },

    /// The file extension does not map to a known format
    #[error("Unsupported configuration format '{0}' (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),
}

impl ConfigError {
    /// Get the error severity.
    ///
    /// A host cannot start the pipeline with a configuration it cannot read.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    /// Create a parse error for the given format.
    pub fn parse(format: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Parse {
            format,
            reason: reason.into(),
        }
    }
}
