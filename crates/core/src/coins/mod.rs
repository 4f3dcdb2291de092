//! Coins module - domain models, services, and traits.

mod coins_model;
mod coins_service;
mod coins_traits;

#[cfg(test)]
mod coins_model_tests;

// Re-export the public interface
pub use coins_model::{compute_roi, Coin, NewCoin, SaleDetails};
pub(crate) use coins_model::ensure_amount;
pub use coins_service::CoinService;
pub use coins_traits::{CoinRepositoryTrait, CoinServiceTrait};
