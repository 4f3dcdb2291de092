use async_trait::async_trait;
use coinfolio_core::coins::{Coin, CoinRepositoryTrait, NewCoin};
use coinfolio_core::constants::{DEFAULT_POLL_INTERVAL, DEFAULT_STORAGE_KEY};
use coinfolio_core::errors::{Error, Result, StorageError};
use coinfolio_core::events::{CoinListener, Subscription};
use log::debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::codec::{decode_coins, encode_coins};
use super::watcher::spawn_watcher;
use crate::kv::KeyValueStore;

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Repository keeping the whole coin collection in one key-value slot.
///
/// Every mutation reads, modifies and rewrites the full array. Mutations
/// issued through the same instance are serialised by `write_lock`; writers
/// outside this instance can still interleave and the last write wins.
pub struct LocalCoinRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
    poll_interval: Duration,
    write_lock: Mutex<()>,
}

impl LocalCoinRepository {
    /// Creates a repository over `store` using the default slot key.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Creates a repository over `store` using a custom slot key.
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            write_lock: Mutex::new(()),
        }
    }

    /// Sets the interval at which subscriptions re-read the slot.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    async fn load(&self) -> Result<Vec<Coin>> {
        let raw = self.store.get(&self.key).await?;
        Ok(decode_coins(raw.as_deref())?)
    }

    async fn save(&self, coins: &[Coin]) -> Result<()> {
        let encoded = encode_coins(coins)?;
        self.store.set(&self.key, &encoded).await
    }
}

#[async_trait]
impl CoinRepositoryTrait for LocalCoinRepository {
    async fn list(&self) -> Result<Vec<Coin>> {
        self.load().await
    }

    async fn create(&self, new_coin: NewCoin) -> Result<Coin> {
        let _guard = self.write_lock.lock().await;
        let mut coins = self.load().await?;

        let coin = Coin::from_new(Uuid::now_v7().to_string(), new_coin)?;
        coins.push(coin.clone());
        self.save(&coins).await?;

        debug!("Stored coin {} in slot '{}'", coin.id, self.key);
        Ok(coin)
    }

    async fn update(&self, coin: Coin) -> Result<Coin> {
        let _guard = self.write_lock.lock().await;
        let mut coins = self.load().await?;

        let slot = coins
            .iter_mut()
            .find(|stored| stored.id == coin.id)
            .ok_or_else(|| Error::Storage(StorageError::NotFound(format!("Coin {}", coin.id))))?;
        *slot = coin.clone();
        self.save(&coins).await?;

        Ok(coin)
    }

    async fn delete(&self, coin_id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut coins = self.load().await?;

        let before = coins.len();
        coins.retain(|coin| coin.id != coin_id);
        if coins.len() == before {
            debug!("Coin {} already absent from slot '{}'", coin_id, self.key);
            return Ok(());
        }
        self.save(&coins).await
    }

    async fn subscribe(&self, listener: CoinListener) -> Result<Subscription> {
        let changes = self.store.changes();
        let raw = self.store.get(&self.key).await?;
        let coins = decode_coins(raw.as_deref())?;
        listener(coins);

        let handle = spawn_watcher(
            self.store.clone(),
            self.key.clone(),
            self.poll_interval,
            changes,
            raw,
            listener,
        );
        debug!(
            "Watching slot '{}' every {:?}",
            self.key, self.poll_interval
        );
        Ok(Subscription::new(move || handle.abort()))
    }
}
