//! Error types for encoder construction and lookup.

use thiserror::Error;

/// Main error type for encoder operations.
#[derive(Error, Debug)]
pub enum EncoderError {
    /// Requested layer label does not exist in the encoder.
    #[error("Unknown layer {name:?}; available layers: {available:?}")]
    UnknownLayer {
        name: String,
        available: Vec<String>,
    },

    /// Encoder was built without any layers.
    #[error("Encoder has no layers")]
    Empty,
}

/// Result type for encoder operations.
pub type Result<T> = std::result::Result<T, EncoderError>;
