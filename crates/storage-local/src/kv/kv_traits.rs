use async_trait::async_trait;
use coinfolio_core::Result;
use tokio::sync::broadcast;

/// A store of text values addressed by key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Receiver of the keys written through this store.
    ///
    /// Stores that cannot observe writes return `None`; watchers then rely
    /// on polling alone.
    fn changes(&self) -> Option<broadcast::Receiver<String>> {
        None
    }
}
