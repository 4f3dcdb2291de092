//! Core error types for the Coinfolio workspace.
//!
//! This module defines backend-agnostic error types. Backend-specific errors
//! (file IO, JSON encoding, document store faults) are converted to these
//! types by the storage crates.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the coin collection core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage operation failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Returns true when the error reports a missing record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Storage(StorageError::NotFound(_)))
    }
}

/// Backend-agnostic error type for store operations.
///
/// Every variant except `NotFound` is a storage fault: the backend could not
/// be reached, refused the write, or held data that could not be decoded.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend could not be reached or read.
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected a write.
    #[error("Write rejected: {0}")]
    WriteRejected(String),

    /// Stored data could not be encoded or decoded.
    #[error("Encoding failed: {0}")]
    Encoding(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Amount '{field}' must not be negative (got {value})")]
    NegativeAmount { field: String, value: String },

    #[error("Amount '{field}' is out of range (got {value})")]
    AmountOutOfRange { field: String, value: String },

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date: {0}")]
    DateParse(#[from] ChronoParseError),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Storage(StorageError::Encoding(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
