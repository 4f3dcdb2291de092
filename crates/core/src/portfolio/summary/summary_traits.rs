//! Portfolio summary service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::watch;

use super::summary_model::PortfolioSummary;
use crate::errors::Result;

/// Trait defining the contract for portfolio summary operations.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    /// Subscribes to the coin collection so the summary follows every change.
    ///
    /// Calling it while already started is a no-op.
    async fn start(&self) -> Result<()>;

    /// Cancels the collection subscription.
    fn stop(&self);

    /// Returns true while subscribed to the collection.
    fn is_running(&self) -> bool;

    /// Re-reads the collection and recomputes the summary.
    async fn refresh(&self) -> PortfolioSummary;

    /// Returns the latest summary.
    fn summary(&self) -> PortfolioSummary;

    /// Returns a receiver notified with every recomputed summary.
    fn watch_summary(&self) -> watch::Receiver<PortfolioSummary>;

    /// Returns the current cash reserve.
    fn cash_reserve(&self) -> Decimal;

    /// Sets the cash reserve and returns the recomputed summary.
    ///
    /// Negative amounts are rejected.
    fn set_cash_reserve(&self, amount: Decimal) -> Result<PortfolioSummary>;
}
