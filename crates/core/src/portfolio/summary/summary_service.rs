use async_trait::async_trait;
use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;

use super::summary_calculator::calculate_summary;
use super::summary_model::PortfolioSummary;
use super::summary_traits::PortfolioServiceTrait;
use crate::coins::{ensure_amount, Coin, CoinServiceTrait};
use crate::errors::Result;
use crate::events::{CoinListener, DomainEvent, DomainEventSink, Subscription};

/// Latest inputs of the summary and the channel it is published on.
///
/// The coin list is a read-only copy replaced wholesale on every
/// notification; it is never mutated in place.
struct PortfolioState {
    coins: RwLock<Vec<Coin>>,
    cash_reserve: RwLock<Decimal>,
    summary_tx: watch::Sender<PortfolioSummary>,
}

impl PortfolioState {
    fn replace_coins(&self, coins: Vec<Coin>) -> PortfolioSummary {
        debug!("Recomputing portfolio summary for {} coins", coins.len());
        *write(&self.coins) = coins;
        self.publish()
    }

    fn publish(&self) -> PortfolioSummary {
        let summary = {
            let coins = read(&self.coins);
            calculate_summary(&coins, *read(&self.cash_reserve))
        };
        self.summary_tx.send_replace(summary.clone());
        summary
    }
}

// Values behind these locks are replaced whole, so a poisoned guard is still usable.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Service keeping the portfolio summary in sync with the coin collection.
pub struct PortfolioService {
    coin_service: Arc<dyn CoinServiceTrait>,
    event_sink: Arc<dyn DomainEventSink>,
    state: Arc<PortfolioState>,
    subscription: Mutex<Option<Subscription>>,
}

impl PortfolioService {
    /// Creates a new PortfolioService with an initial cash reserve.
    pub fn new(
        coin_service: Arc<dyn CoinServiceTrait>,
        event_sink: Arc<dyn DomainEventSink>,
        cash_reserve: Decimal,
    ) -> Result<Self> {
        ensure_valid_cash(cash_reserve)?;
        let (summary_tx, _) = watch::channel(calculate_summary(&[], cash_reserve));
        Ok(Self {
            coin_service,
            event_sink,
            state: Arc::new(PortfolioState {
                coins: RwLock::new(Vec::new()),
                cash_reserve: RwLock::new(cash_reserve),
                summary_tx,
            }),
            subscription: Mutex::new(None),
        })
    }
}

fn ensure_valid_cash(amount: Decimal) -> Result<()> {
    ensure_amount("cashReserve", amount)
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn start(&self) -> Result<()> {
        if self.is_running() {
            return Ok(());
        }

        let state = self.state.clone();
        let listener: CoinListener = Arc::new(move |coins: Vec<Coin>| {
            state.replace_coins(coins);
        });
        let subscription = self.coin_service.subscribe(listener).await?;

        // A concurrent start may have won the race; the replaced handle is
        // cancelled when dropped.
        let previous = lock(&self.subscription).replace(subscription);
        drop(previous);
        info!("Portfolio summary subscribed to the coin collection");
        Ok(())
    }

    fn stop(&self) {
        let subscription = lock(&self.subscription).take();
        if let Some(subscription) = subscription {
            subscription.cancel();
            info!("Portfolio summary unsubscribed from the coin collection");
        }
    }

    fn is_running(&self) -> bool {
        lock(&self.subscription)
            .as_ref()
            .map(Subscription::is_active)
            .unwrap_or(false)
    }

    async fn refresh(&self) -> PortfolioSummary {
        let coins = self.coin_service.list_all().await;
        self.state.replace_coins(coins)
    }

    fn summary(&self) -> PortfolioSummary {
        self.state.summary_tx.borrow().clone()
    }

    fn watch_summary(&self) -> watch::Receiver<PortfolioSummary> {
        self.state.summary_tx.subscribe()
    }

    fn cash_reserve(&self) -> Decimal {
        *read(&self.state.cash_reserve)
    }

    fn set_cash_reserve(&self, amount: Decimal) -> Result<PortfolioSummary> {
        ensure_valid_cash(amount)?;
        *write(&self.state.cash_reserve) = amount;
        let summary = self.state.publish();
        self.event_sink
            .emit(DomainEvent::cash_reserve_changed(amount));
        Ok(summary)
    }
}
