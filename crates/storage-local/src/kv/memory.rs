use async_trait::async_trait;
use coinfolio_core::Result;
use std::collections::HashMap;
use std::sync::RwLock;
use tokio::sync::broadcast;

use super::kv_traits::KeyValueStore;

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Process-local key-value store that announces every write.
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
    changes: broadcast::Sender<String>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            entries: RwLock::new(HashMap::new()),
            changes,
        }
    }
}

impl Default for InMemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
        // No subscribers is fine: watchers fall back to polling.
        let _ = self.changes.send(key.to_string());
        Ok(())
    }

    fn changes(&self) -> Option<broadcast::Receiver<String>> {
        Some(self.changes.subscribe())
    }
}
