//! Coin repository and service traits.
//!
//! These traits define the contract for coin operations without any
//! backend-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::coins_model::{Coin, NewCoin, SaleDetails};
use crate::errors::Result;
use crate::events::{CoinListener, Subscription};

/// Trait defining the contract for a coin collection backend.
///
/// Implementations own the canonical coin set. The trait is backend-agnostic:
/// a local key-value slot and a remote document collection both implement it.
#[async_trait]
pub trait CoinRepositoryTrait: Send + Sync {
    /// Returns the full coin set.
    async fn list(&self) -> Result<Vec<Coin>>;

    /// Stores a new coin under a freshly assigned identifier.
    async fn create(&self, new_coin: NewCoin) -> Result<Coin>;

    /// Replaces every field of an existing coin, keyed by `coin.id`.
    ///
    /// Fails with `StorageError::NotFound` when the identifier is unknown.
    async fn update(&self, coin: Coin) -> Result<Coin>;

    /// Deletes a coin by its ID. Deleting an unknown ID succeeds.
    async fn delete(&self, coin_id: &str) -> Result<()>;

    /// Registers a listener receiving the full coin set on every change.
    ///
    /// The listener is called once with the current state before this
    /// method returns.
    async fn subscribe(&self, listener: CoinListener) -> Result<Subscription>;
}

/// Trait defining the contract for coin service operations.
///
/// The service layer validates input, applies the sell transition and
/// reports mutations as domain events.
#[async_trait]
pub trait CoinServiceTrait: Send + Sync {
    /// Lists every coin. Retrieval faults are logged and yield an empty list.
    async fn list_all(&self) -> Vec<Coin>;

    /// Retrieves a coin by ID.
    async fn get_coin(&self, coin_id: &str) -> Result<Coin>;

    /// Adds a new coin with validation.
    async fn add_coin(&self, new_coin: NewCoin) -> Result<Coin>;

    /// Replaces an existing coin with validation.
    async fn update_coin(&self, coin: Coin) -> Result<Coin>;

    /// Marks a coin as sold.
    async fn mark_sold(&self, coin_id: &str, sale: SaleDetails) -> Result<Coin>;

    /// Moves a sold coin back to the held state.
    async fn mark_unsold(&self, coin_id: &str) -> Result<Coin>;

    /// Deletes a coin. Idempotent.
    async fn delete_coin(&self, coin_id: &str) -> Result<()>;

    /// Subscribes to collection changes.
    async fn subscribe(&self, listener: CoinListener) -> Result<Subscription>;

    /// Cancels a subscription. Safe to call on an already cancelled handle.
    fn unsubscribe(&self, subscription: &Subscription) {
        subscription.cancel();
    }
}
