use async_trait::async_trait;
use coinfolio_core::events::Subscription;
use coinfolio_core::Result;
use std::sync::Arc;

/// Field map of a single document.
pub type DocumentFields = serde_json::Map<String, serde_json::Value>;

/// Callback invoked with a collection's full document snapshot.
pub type DocumentListener = Arc<dyn Fn(Vec<Document>) + Send + Sync>;

/// Registration returned by `DocumentStore::watch`. Cancelling or dropping
/// it unregisters the listener.
pub type WatchHandle = Subscription;

/// A stored document: its key within the collection and its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: DocumentFields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: DocumentFields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// Client interface of a document database with a push change feed.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns every document of `collection`. An unknown collection is empty.
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>>;

    /// Stores a new document and returns the key the store assigned.
    async fn add_document(&self, collection: &str, fields: DocumentFields) -> Result<String>;

    /// Replaces the fields of an existing document.
    ///
    /// Fails with `StorageError::NotFound` when no document has key `id`.
    async fn update_document(&self, collection: &str, id: &str, fields: DocumentFields)
        -> Result<()>;

    /// Deletes a document. Deleting a missing key succeeds.
    async fn delete_document(&self, collection: &str, id: &str) -> Result<()>;

    /// Registers `listener` for changes to `collection`.
    ///
    /// The listener receives the current snapshot before this method returns
    /// and a fresh snapshot after every subsequent change.
    async fn watch(&self, collection: &str, listener: DocumentListener) -> Result<WatchHandle>;
}
