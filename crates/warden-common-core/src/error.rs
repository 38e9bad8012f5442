//! Error types for Warden.

use thiserror::Error;

/// The main error type for Warden operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error with custom message.
    #[error("{0}")]
    Generic(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a new generic error.
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias using Warden's Error.
pub type Result<T> = std::result::Result<T, Error>;
