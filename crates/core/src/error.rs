//! Error types for layout resolution.

use thiserror::Error;

/// Result type for layout resolution.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving an environment layout.
///
/// A missing library directory is never an error: it simply contributes
/// nothing to the enumeration.
#[derive(Error, Debug)]
pub enum Error {
    /// Version string could not be parsed.
    #[error("Invalid interpreter version '{0}': {1}")]
    InvalidVersion(String, String),

    /// No layout rule exists for this interpreter.
    #[error("Unsupported interpreter: {stem} does not handle version {version}")]
    UnsupportedInterpreter {
        /// Executable stem of the resolver that rejected the descriptor.
        stem: String,
        /// The rejected version.
        version: String,
    },

    /// The interpreter descriptor violates a precondition.
    #[error("Invalid interpreter descriptor field '{field}': {reason}")]
    InvalidDescriptor {
        /// Descriptor field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A shared-library glob pattern failed to compile.
    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid version error.
    #[must_use]
    pub fn invalid_version(version: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidVersion(version.into(), message.into())
    }

    /// Create an unsupported interpreter error.
    #[must_use]
    pub fn unsupported_interpreter(stem: impl Into<String>, version: impl Into<String>) -> Self {
        Self::UnsupportedInterpreter {
            stem: stem.into(),
            version: version.into(),
        }
    }

    /// Create an invalid descriptor error.
    #[must_use]
    pub fn invalid_descriptor(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            field,
            reason: reason.into(),
        }
    }

    /// Create an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}
