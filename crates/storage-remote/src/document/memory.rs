use async_trait::async_trait;
use coinfolio_core::Result;
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use uuid::Uuid;

use super::document_traits::{
    Document, DocumentFields, DocumentListener, DocumentStore, WatchHandle,
};
use crate::errors::RemoteStorageError;

struct Watcher {
    id: u64,
    collection: String,
    listener: DocumentListener,
}

#[derive(Default)]
struct State {
    collections: HashMap<String, Vec<Document>>,
    watchers: Vec<Watcher>,
    next_watcher_id: u64,
}

struct Shared {
    state: Mutex<State>,
    // Serialises snapshot deliveries so listeners observe changes in order.
    delivery: Mutex<()>,
}

/// Process-local document store with a synchronous push change feed.
///
/// Documents keep their insertion order. Listeners run on the task that
/// performed the mutation, after the state lock has been released.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    shared: Arc<Shared>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State::default()),
                delivery: Mutex::new(()),
            }),
        }
    }

    /// Number of listeners currently registered on `collection`.
    pub fn watcher_count(&self, collection: &str) -> usize {
        self.shared
            .state()
            .watchers
            .iter()
            .filter(|w| w.collection == collection)
            .count()
    }

    fn notify(&self, collection: &str) {
        let _delivery = self.shared.deliver();
        let (snapshot, listeners) = {
            let state = self.shared.state();
            (
                state.snapshot(collection),
                state.listeners_for(collection),
            )
        };
        for listener in listeners {
            listener(snapshot.clone());
        }
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn deliver(&self) -> MutexGuard<'_, ()> {
        self.delivery
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn unwatch(&self, watcher_id: u64) {
        self.state().watchers.retain(|w| w.id != watcher_id);
        debug!("Removed document watcher {}", watcher_id);
    }
}

impl State {
    fn snapshot(&self, collection: &str) -> Vec<Document> {
        self.collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn listeners_for(&self, collection: &str) -> Vec<DocumentListener> {
        self.watchers
            .iter()
            .filter(|w| w.collection == collection)
            .map(|w| w.listener.clone())
            .collect()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>> {
        Ok(self.shared.state().snapshot(collection))
    }

    async fn add_document(&self, collection: &str, fields: DocumentFields) -> Result<String> {
        let id = Uuid::new_v4().simple().to_string();
        self.shared
            .state()
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(Document::new(id.clone(), fields));

        self.notify(collection);
        Ok(id)
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        fields: DocumentFields,
    ) -> Result<()> {
        {
            let mut state = self.shared.state();
            let document = state
                .collections
                .get_mut(collection)
                .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
                .ok_or_else(|| RemoteStorageError::DocumentNotFound {
                    collection: collection.to_string(),
                    id: id.to_string(),
                })?;
            document.fields = fields;
        }

        self.notify(collection);
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<()> {
        let removed = {
            let mut state = self.shared.state();
            match state.collections.get_mut(collection) {
                Some(docs) => {
                    let before = docs.len();
                    docs.retain(|doc| doc.id != id);
                    docs.len() != before
                }
                None => false,
            }
        };

        if removed {
            self.notify(collection);
        }
        Ok(())
    }

    async fn watch(&self, collection: &str, listener: DocumentListener) -> Result<WatchHandle> {
        let _delivery = self.shared.deliver();
        let (watcher_id, snapshot) = {
            let mut state = self.shared.state();
            let watcher_id = state.next_watcher_id;
            state.next_watcher_id += 1;
            state.watchers.push(Watcher {
                id: watcher_id,
                collection: collection.to_string(),
                listener: listener.clone(),
            });
            (watcher_id, state.snapshot(collection))
        };
        listener(snapshot);

        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        Ok(WatchHandle::new(move || {
            if let Some(shared) = shared.upgrade() {
                shared.unwatch(watcher_id);
            }
        }))
    }
}
