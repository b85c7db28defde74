//! Store error types.

use thiserror::Error;

/// Errors from key-value store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Underlying store operation failed.
    #[error("Store error: {0}")]
    StoreError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
