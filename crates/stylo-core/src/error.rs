//! Error types for core image operations.

use thiserror::Error;

/// Main error type for core image operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Edge size that cannot constrain an image.
    #[error("Invalid edge size: {0} (must be at least 1)")]
    InvalidEdgeSize(usize),

    /// Edge kind name that is neither "short" nor "long".
    #[error("Unknown edge kind: {0:?} (expected \"short\" or \"long\")")]
    UnknownEdge(String),
}

/// Result type for core image operations.
pub type Result<T> = std::result::Result<T, CoreError>;
