//! Remote storage implementation for Coinfolio.
//!
//! Each coin is one document in a document collection, keyed by the coin's
//! identifier. This crate provides:
//! - The `DocumentStore` primitive and an in-memory reference implementation
//! - The wire codec mapping coins to document fields
//! - `RemoteCoinRepository`, implementing `CoinRepositoryTrait` from `coinfolio-core`
//!
//! Change notification uses the store's push feed (`DocumentStore::watch`);
//! nothing in this crate polls.

pub mod coins;
pub mod document;
pub mod errors;

pub use coins::{CoinDocument, RemoteCoinRepository, WireTimestamp};
pub use document::{
    Document, DocumentFields, DocumentListener, DocumentStore, InMemoryDocumentStore, WatchHandle,
};
pub use errors::RemoteStorageError;

// Re-export from coinfolio-core for convenience
pub use coinfolio_core::errors::{Error, Result, StorageError};
