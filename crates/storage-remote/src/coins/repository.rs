use async_trait::async_trait;
use coinfolio_core::coins::{Coin, CoinRepositoryTrait, NewCoin};
use coinfolio_core::constants::DEFAULT_COLLECTION;
use coinfolio_core::errors::Result;
use coinfolio_core::events::{CoinListener, Subscription};
use log::{debug, warn};
use std::sync::Arc;

use super::codec::{decode_coin, encode_coin};
use crate::document::{Document, DocumentListener, DocumentStore};

/// Repository storing each coin as one document of a remote collection.
pub struct RemoteCoinRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl RemoteCoinRepository {
    /// Creates a repository over the default collection.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_collection(store, DEFAULT_COLLECTION)
    }

    pub fn with_collection(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}

/// Decodes a change-feed snapshot, skipping documents that fail to decode.
fn decode_snapshot(collection: &str, documents: &[Document]) -> Vec<Coin> {
    documents
        .iter()
        .filter_map(|document| match decode_coin(document) {
            Ok(coin) => Some(coin),
            Err(e) => {
                warn!("Skipping document in '{}': {}", collection, e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl CoinRepositoryTrait for RemoteCoinRepository {
    async fn list(&self) -> Result<Vec<Coin>> {
        let documents = self.store.list_documents(&self.collection).await?;
        documents
            .iter()
            .map(|document| decode_coin(document).map_err(Into::into))
            .collect()
    }

    async fn create(&self, new_coin: NewCoin) -> Result<Coin> {
        let mut coin = Coin::from_new(String::new(), new_coin)?;
        let fields = encode_coin(&coin)?;

        coin.id = self.store.add_document(&self.collection, fields).await?;
        debug!("Added coin document {} to '{}'", coin.id, self.collection);
        Ok(coin)
    }

    async fn update(&self, coin: Coin) -> Result<Coin> {
        let fields = encode_coin(&coin)?;
        self.store
            .update_document(&self.collection, &coin.id, fields)
            .await?;
        Ok(coin)
    }

    async fn delete(&self, coin_id: &str) -> Result<()> {
        self.store.delete_document(&self.collection, coin_id).await
    }

    async fn subscribe(&self, listener: CoinListener) -> Result<Subscription> {
        let collection = self.collection.clone();
        let on_snapshot: DocumentListener = Arc::new(move |documents: Vec<Document>| {
            listener(decode_snapshot(&collection, &documents));
        });

        let handle = self.store.watch(&self.collection, on_snapshot).await?;
        debug!("Watching collection '{}'", self.collection);
        Ok(handle)
    }
}
