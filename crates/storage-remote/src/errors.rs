//! Storage-specific error types for the remote backend.

use coinfolio_core::errors::{Error, StorageError};
use thiserror::Error;

/// Errors raised by document stores and the remote coin repository.
///
/// Converted to `coinfolio_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum RemoteStorageError {
    #[error("Document '{id}' not found in collection '{collection}'")]
    DocumentNotFound { collection: String, id: String },

    #[error("Failed to decode document '{id}': {message}")]
    Decode { id: String, message: String },

    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Document store unavailable: {0}")]
    Unavailable(String),
}

impl From<RemoteStorageError> for Error {
    fn from(err: RemoteStorageError) -> Self {
        let message = err.to_string();
        match err {
            RemoteStorageError::DocumentNotFound { .. } => {
                Error::Storage(StorageError::NotFound(message))
            }
            RemoteStorageError::Decode { .. } | RemoteStorageError::Encode(_) => {
                Error::Storage(StorageError::Encoding(message))
            }
            RemoteStorageError::Unavailable(_) => {
                Error::Storage(StorageError::Unavailable(message))
            }
        }
    }
}
