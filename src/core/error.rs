//! Error types and handling for degree-window
//!
//! Every failure in this crate is fatal to the run that produced it: the
//! computation is a deterministic single pass, so errors propagate to the
//! caller instead of being retried or swallowed.

use thiserror::Error;

/// Main result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for degree-window
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed edge record (missing field, non-numeric timestamp)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Degree exponentiation overflow or a non-finite theta/expiration
    #[error("Numeric range error: {0}")]
    NumericRange(String),

    /// Report encoding errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors from std
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a numeric range error
    pub fn numeric_range(msg: impl Into<String>) -> Self {
        Self::NumericRange(msg.into())
    }

    /// Whether the error came from the edge stream rather than the setup
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("Failed to parse config file: {}", err))
    }
}
