//! Coinfolio Core - Domain entities, services, and traits.
//!
//! This crate contains the core logic for tracking a coin collection.
//! It is backend-agnostic and defines the store contract implemented by the
//! `storage-local` and `storage-remote` crates.

pub mod coins;
pub mod constants;
pub mod errors;
pub mod events;
pub mod portfolio;

// Re-export common types from coin and portfolio modules
pub use coins::*;
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
