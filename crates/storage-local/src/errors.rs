//! Storage-specific error types for the local backend.
//!
//! These errors wrap IO and JSON failures and are converted to the
//! backend-agnostic error types defined in `coinfolio_core`.

use coinfolio_core::errors::{Error, StorageError, ValidationError};
use thiserror::Error;

/// Errors raised by key-value stores and the local coin repository.
///
/// Converted to `coinfolio_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum LocalStorageError {
    #[error("Failed to read '{key}': {source}")]
    ReadFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{key}': {source}")]
    WriteFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored collection is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

impl From<LocalStorageError> for Error {
    fn from(err: LocalStorageError) -> Self {
        let message = err.to_string();
        match err {
            LocalStorageError::ReadFailed { .. } => {
                Error::Storage(StorageError::Unavailable(message))
            }
            LocalStorageError::WriteFailed { .. } => {
                Error::Storage(StorageError::WriteRejected(message))
            }
            LocalStorageError::Serialization(e) => {
                Error::Storage(StorageError::Encoding(e.to_string()))
            }
            LocalStorageError::InvalidKey(key) => Error::Validation(
                ValidationError::InvalidInput(format!("Invalid storage key: {}", key)),
            ),
        }
    }
}
