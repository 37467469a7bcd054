//! Error types for tome-vector.

use thiserror::Error;

/// Result type for tome-vector operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tome-vector operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Dimension mismatch between a vector and the index.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions.
        expected: usize,
        /// Actual dimensions provided.
        actual: usize,
    },

    /// Invalid vector (e.g., empty, contains NaN).
    #[error("Invalid vector: {0}")]
    InvalidVector(String),
}
