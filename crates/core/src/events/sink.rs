//! Where core services send their domain events.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::DomainEvent;

/// Receiver of the events emitted after successful coin and cash mutations.
///
/// Called inline on the mutating path, so implementations must not block.
/// Emission cannot fail the mutation.
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);
}

/// Discards every event.
#[derive(Clone, Default)]
pub struct NoOpDomainEventSink;

impl DomainEventSink for NoOpDomainEventSink {
    fn emit(&self, _event: DomainEvent) {}
}

/// Writes each event to the `log` facade at debug level, keyed by coin id
/// when the event has one.
#[derive(Clone, Default)]
pub struct LoggingDomainEventSink;

impl DomainEventSink for LoggingDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        match event.coin_id() {
            Some(coin_id) => log::debug!("Coin {}: {:?}", coin_id, event),
            None => log::debug!("Portfolio: {:?}", event),
        }
    }
}

/// Keeps emitted events in memory, in emission order. Clones share the
/// same buffer.
#[derive(Clone, Default)]
pub struct CollectingDomainEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl CollectingDomainEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn buffer(&self) -> MutexGuard<'_, Vec<DomainEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the events collected so far.
    pub fn events(&self) -> Vec<DomainEvent> {
        self.buffer().clone()
    }

    /// Removes and returns the collected events.
    pub fn take(&self) -> Vec<DomainEvent> {
        std::mem::take(&mut *self.buffer())
    }

    pub fn len(&self) -> usize {
        self.buffer().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer().is_empty()
    }
}

impl DomainEventSink for CollectingDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        self.buffer().push(event);
    }
}
