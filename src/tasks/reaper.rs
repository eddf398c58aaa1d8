//! TTL Reaper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Weak;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::CacheStore;

/// Spawns a background task that reaps expired entries every `reap_period`.
///
/// The first tick fires one full period after the call. Each tick holds the
/// store lock only for the scan. The task exits when `shutdown` flips to
/// `true`, when its sender is dropped, or when the store itself is gone.
/// A period too large to schedule leaves the task idle until shutdown.
///
/// # Arguments
/// * `store` - Weak reference to the store, so the task never keeps it alive
/// * `reap_period` - Time between reap runs; must be non-zero
/// * `shutdown` - Stop signal
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new(ttl)));
/// let (tx, rx) = watch::channel(false);
/// let handle = spawn_reaper_task(Arc::downgrade(&store), ttl, rx);
/// // Later:
/// tx.send_replace(true);
/// ```
pub fn spawn_reaper_task(
    store: Weak<Mutex<CacheStore>>,
    reap_period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let first_tick = Instant::now()
        .checked_add(reap_period)
        .filter(|first| first.checked_add(reap_period).is_some());

    tokio::spawn(async move {
        info!("Starting cache reaper with period of {:?}", reap_period);

        let mut ticker = match first_tick {
            Some(first_tick) => {
                let mut ticker = tokio::time::interval_at(first_tick, reap_period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                Some(ticker)
            }
            None => {
                warn!("Reap period {:?} cannot be scheduled, reaper idle", reap_period);
                None
            }
        };

        loop {
            tokio::select! {
                _ = next_tick(&mut ticker) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                    continue;
                }
            }

            let Some(store) = store.upgrade() else {
                break;
            };

            let removed = store.lock().cleanup_expired(Instant::now());

            if removed > 0 {
                debug!("Cache reap: removed {} expired entries", removed);
            }
        }

        debug!("Cache reaper stopped");
    })
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
