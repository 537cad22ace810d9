//! Error types for pyramid construction and access.

use thiserror::Error;

/// Main error type for pyramid operations.
#[derive(Error, Debug)]
pub enum PyramidError {
    /// Invalid construction parameters.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Indexed access past the last level.
    #[error("Level index {index} out of range for pyramid with {len} levels")]
    LevelOutOfRange { index: usize, len: usize },
}

/// Result type for pyramid operations.
pub type Result<T> = std::result::Result<T, PyramidError>;

impl PyramidError {
    /// Create an invalid configuration error.
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
