//! Error types for the redaction planner.
//!
//! Only construction-time and I/O failures are errors. Per-page geometry
//! problems are reported as [`PageIssue`](crate::redaction::PageIssue)
//! values inside the plan, and validator rejections are silent.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for planner operations.
pub type RedactorResult<T> = Result<T, RedactorError>;

/// Error type for all fallible planner operations.
#[derive(Debug, Error)]
pub enum RedactorError {
    /// A configuration value is out of range or inconsistent.
    #[error("Invalid configuration for '{parameter}': {reason}")]
    InvalidConfig { parameter: String, reason: String },

    /// A custom pattern failed to compile.
    #[error("Pattern error for '{pattern}': {reason}")]
    PatternError { pattern: String, reason: String },

    /// Error occurred while reading or writing files
    #[error("IO error for path '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A config or input file could not be decoded.
    #[error("Failed to parse '{}': {reason}", path.display())]
    Parse { path: PathBuf, reason: String },
}

impl RedactorError {
    pub(crate) fn invalid_config(parameter: &str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter: parameter.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<regex::Error> for RedactorError {
    fn from(err: regex::Error) -> Self {
        Self::PatternError {
            pattern: "<unknown>".to_string(),
            reason: err.to_string(),
        }
    }
}
