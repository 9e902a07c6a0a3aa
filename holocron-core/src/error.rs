//! Error types for holocron operations
//!
//! Every failure the pipeline can surface is a variant of [`HolocronError`].
//! Coercions never fail; they pass unconvertible input through instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fetching, caching and building entities
#[derive(Error, Debug)]
pub enum HolocronError {
    /// Mapping specification names a field the builder has no coercion for
    #[error("Configuration error: unknown {kind} field '{field}' in mapping specification")]
    UnknownField { kind: String, field: String },

    /// Raw record lacks a field every entity must carry
    #[error("Missing required field '{field}' in raw {kind} record")]
    MissingField { kind: String, field: String },

    /// Transport-level failure talking to the remote API
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Remote API answered with a non-success status
    #[error("Remote API returned {status} for {locator}")]
    Status { locator: String, status: u16 },

    /// Remote call exceeded the configured timeout
    #[error("Fetch timed out after {timeout_seconds}s: {locator}")]
    Timeout {
        locator: String,
        timeout_seconds: u64,
    },

    /// A search returned no matching resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// Cache document could not be read or written
    #[error("Persistence error at {}: {message}", .path.display())]
    Persistence { path: PathBuf, message: String },

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("Error: {0}")]
    Other(String),
}

impl HolocronError {
    pub(crate) fn unknown_field(kind: impl ToString, field: impl Into<String>) -> Self {
        HolocronError::UnknownField {
            kind: kind.to_string(),
            field: field.into(),
        }
    }

    pub(crate) fn missing_field(kind: impl ToString, field: impl Into<String>) -> Self {
        HolocronError::MissingField {
            kind: kind.to_string(),
            field: field.into(),
        }
    }

    pub(crate) fn persistence(path: impl Into<PathBuf>, err: impl ToString) -> Self {
        HolocronError::Persistence {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// True for the fatal configuration class (bad mapping or config values)
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            HolocronError::UnknownField { .. } | HolocronError::Config(_)
        )
    }
}

/// Result type alias for holocron operations
pub type Result<T> = std::result::Result<T, HolocronError>;

impl From<serde_json::Error> for HolocronError {
    fn from(e: serde_json::Error) -> Self {
        HolocronError::Serialization(e.to_string())
    }
}

impl From<String> for HolocronError {
    fn from(s: String) -> Self {
        HolocronError::Other(s)
    }
}

impl From<&str> for HolocronError {
    fn from(s: &str) -> Self {
        HolocronError::Other(s.to_string())
    }
}
