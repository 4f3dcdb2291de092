use async_trait::async_trait;
use log::{debug, error};
use std::sync::Arc;

use super::coins_model::{Coin, NewCoin, SaleDetails};
use super::coins_traits::{CoinRepositoryTrait, CoinServiceTrait};
use crate::errors::{Error, Result, StorageError};
use crate::events::{CoinListener, DomainEvent, DomainEventSink, Subscription};

/// Service for managing the coin collection on top of any backend.
pub struct CoinService {
    repository: Arc<dyn CoinRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl CoinService {
    /// Creates a new CoinService instance
    pub fn new(
        repository: Arc<dyn CoinRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
        }
    }
}

#[async_trait]
impl CoinServiceTrait for CoinService {
    async fn list_all(&self) -> Vec<Coin> {
        match self.repository.list().await {
            Ok(coins) => coins,
            Err(e) => {
                error!("Failed to list coins, returning an empty collection: {}", e);
                Vec::new()
            }
        }
    }

    async fn get_coin(&self, coin_id: &str) -> Result<Coin> {
        self.repository
            .list()
            .await?
            .into_iter()
            .find(|coin| coin.id == coin_id)
            .ok_or_else(|| Error::Storage(StorageError::NotFound(format!("Coin {}", coin_id))))
    }

    async fn add_coin(&self, new_coin: NewCoin) -> Result<Coin> {
        new_coin.validate()?;
        debug!("Adding coin '{}'", new_coin.name);

        let coin = self.repository.create(new_coin).await?;
        self.event_sink.emit(DomainEvent::coin_added(coin.id.clone()));
        Ok(coin)
    }

    async fn update_coin(&self, coin: Coin) -> Result<Coin> {
        coin.validate()?;
        debug!("Updating coin {}", coin.id);

        let updated = self.repository.update(coin).await?;
        self.event_sink
            .emit(DomainEvent::coin_updated(updated.id.clone()));
        Ok(updated)
    }

    async fn mark_sold(&self, coin_id: &str, sale: SaleDetails) -> Result<Coin> {
        sale.validate()?;
        let coin = self.get_coin(coin_id).await?;
        debug!(
            "Marking coin {} as sold at {} on {}",
            coin_id, sale.sold_price, sale.sold_date
        );

        let sold = coin.into_sold(sale);
        sold.validate()?;
        let sold = self.repository.update(sold).await?;
        self.event_sink
            .emit(DomainEvent::coin_sold(sold.id.clone(), sale.sold_price));
        Ok(sold)
    }

    async fn mark_unsold(&self, coin_id: &str) -> Result<Coin> {
        let coin = self.get_coin(coin_id).await?;
        if !coin.is_sold {
            return Ok(coin);
        }

        let held = self.repository.update(coin.into_unsold()).await?;
        self.event_sink.emit(DomainEvent::coin_unsold(held.id.clone()));
        Ok(held)
    }

    async fn delete_coin(&self, coin_id: &str) -> Result<()> {
        self.repository.delete(coin_id).await?;
        self.event_sink.emit(DomainEvent::coin_deleted(coin_id));
        Ok(())
    }

    async fn subscribe(&self, listener: CoinListener) -> Result<Subscription> {
        self.repository.subscribe(listener).await
    }
}
