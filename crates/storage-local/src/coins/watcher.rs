//! Background task detecting changes to the coin slot.

use coinfolio_core::events::CoinListener;
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tokio::time::{interval, Interval, MissedTickBehavior};

use super::codec::decode_coins;
use crate::kv::KeyValueStore;

/// Spawns the task re-reading `key` and calling `listener` whenever the
/// stored text differs byte-for-byte from `last_seen`.
///
/// The task re-reads on every poll tick and, when `changes` is present, as
/// soon as the store announces a write. `changes` must be obtained before
/// `last_seen` was read so that no write falls between the two.
pub(crate) fn spawn_watcher(
    store: Arc<dyn KeyValueStore>,
    key: String,
    poll_interval: Duration,
    mut changes: Option<broadcast::Receiver<String>>,
    mut last_seen: Option<String>,
    listener: CoinListener,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the initial state was
        // already delivered by the subscriber.
        ticker.tick().await;

        loop {
            wait_for_change(&mut ticker, &mut changes).await;

            let raw = match store.get(&key).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("Failed to poll coin slot '{}': {}", key, e);
                    continue;
                }
            };
            if raw == last_seen {
                continue;
            }

            match decode_coins(raw.as_deref()) {
                Ok(coins) => {
                    debug!("Coin slot '{}' changed ({} coins)", key, coins.len());
                    listener(coins);
                }
                Err(e) => warn!("Ignoring undecodable coin slot '{}': {}", key, e),
            }
            last_seen = raw;
        }
    })
}

async fn wait_for_change(
    ticker: &mut Interval,
    changes: &mut Option<broadcast::Receiver<String>>,
) {
    let closed = match changes.as_mut() {
        Some(rx) => tokio::select! {
            _ = ticker.tick() => false,
            received = rx.recv() => matches!(received, Err(RecvError::Closed)),
        },
        None => {
            ticker.tick().await;
            false
        }
    };
    if closed {
        *changes = None;
    }
}
