//! Error types for brush construction and lookup

use thiserror::Error;

/// Result type alias for brush operations
pub type Result<T> = std::result::Result<T, Error>;

/// Brush engine error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A rule, brush or registry entry is malformed. Raised while building
    /// configuration, never while tokenizing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No brush answers to the requested language tag
    #[error("No brush for language: {0}")]
    NotFound(String),
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }
}
