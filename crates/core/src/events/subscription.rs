//! Cancellation handles for change subscriptions.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::coins::Coin;

/// Callback invoked with the full coin set on every observed change.
pub type CoinListener = Arc<dyn Fn(Vec<Coin>) + Send + Sync>;

type CancelFn = Box<dyn FnOnce() + Send>;

/// Handle to a registered change listener.
///
/// Cancelling is idempotent. Dropping the handle cancels it as well, so a
/// polling task or change-feed registration never outlives its owner.
pub struct Subscription {
    cancel: Mutex<Option<CancelFn>>,
}

impl Subscription {
    /// Wraps the teardown action of a backend subscription.
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Mutex::new(Some(Box::new(cancel))),
        }
    }

    /// Stops future deliveries. Calling it again is a no-op.
    pub fn cancel(&self) {
        let cancel = self.slot().take();
        if let Some(cancel) = cancel {
            cancel();
        }
    }

    /// Returns true until the subscription has been cancelled.
    pub fn is_active(&self) -> bool {
        self.slot().is_some()
    }

    fn slot(&self) -> MutexGuard<'_, Option<CancelFn>> {
        // The slot only holds an Option; a poisoned lock still has a usable value.
        self.cancel
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_subscription() -> (Subscription, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let subscription = Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (subscription, calls)
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let (subscription, calls) = counting_subscription();
        assert!(subscription.is_active());

        subscription.cancel();
        subscription.cancel();

        assert!(!subscription.is_active());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_cancels() {
        let (subscription, calls) = counting_subscription();
        drop(subscription);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_after_cancel_does_not_cancel_twice() {
        let (subscription, calls) = counting_subscription();
        subscription.cancel();
        drop(subscription);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
