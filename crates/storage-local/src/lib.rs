//! Local storage implementation for Coinfolio.
//!
//! The whole coin collection lives in a single key-value slot as a JSON
//! array. This crate provides:
//! - The `KeyValueStore` primitive with in-memory and file-backed implementations
//! - `LocalCoinRepository`, implementing `CoinRepositoryTrait` from `coinfolio-core`
//! - Change detection by polling the slot, woken early by store change events
//!
//! ```text
//!     coinfolio-core (CoinRepositoryTrait)
//!                  │
//!                  ▼
//!      LocalCoinRepository (this crate)
//!                  │
//!                  ▼
//!   KeyValueStore (memory | files on disk)
//! ```

pub mod coins;
pub mod errors;
pub mod kv;

pub use coins::LocalCoinRepository;
pub use errors::LocalStorageError;
pub use kv::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};

// Re-export from coinfolio-core for convenience
pub use coinfolio_core::errors::{Error, Result, StorageError};
