//! Shared Cache Handle
//!
//! Thread-safe, cloneable front for [`CacheStore`] that owns the background reaper.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::cache::{CacheStore, MAX_INTERVAL, MIN_INTERVAL};
use crate::tasks::spawn_reaper_task;

// == Cache ==
/// Expiring key/value cache for raw response bodies.
///
/// Cloning is cheap and every clone refers to the same entries. Construction
/// spawns a reaper task on the current Tokio runtime, so it must be called
/// from within one. The reaper stops on [`Cache::close`] or once the last
/// handle is dropped.
#[derive(Debug, Clone)]
pub struct Cache {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    store: Arc<Mutex<CacheStore>>,
    shutdown: watch::Sender<bool>,
    interval: Duration,
    reap_period: Duration,
}

impl Cache {
    // == Constructor ==
    /// Creates a cache whose entries expire after `interval`, reaped on the same period.
    pub fn new(interval: Duration) -> Self {
        Self::with_reap_period(interval, interval)
    }

    /// Creates a cache with a reap tick independent of the TTL.
    ///
    /// A shorter `reap_period` narrows the window in which an expired entry
    /// can still be observed. Zero durations are raised to [`MIN_INTERVAL`]
    /// and anything beyond [`MAX_INTERVAL`] is lowered to it.
    pub fn with_reap_period(interval: Duration, reap_period: Duration) -> Self {
        let interval = clamp_interval(interval, "interval");
        let reap_period = clamp_interval(reap_period, "reap period");

        let store = Arc::new(Mutex::new(CacheStore::new(interval)));
        let (shutdown, shutdown_rx) = watch::channel(false);

        spawn_reaper_task(Arc::downgrade(&store), reap_period, shutdown_rx);

        Self {
            inner: Arc::new(Inner {
                store,
                shutdown,
                interval,
                reap_period,
            }),
        }
    }

    // == Store ==
    /// Inserts or overwrites `key`, restarting its TTL.
    pub fn store(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let key = key.into();
        let value = value.into();
        debug!(key = %key, bytes = value.len(), "cache store");
        self.inner.store.lock().set(key, value, Instant::now());
    }

    // == Lookup ==
    /// Returns a copy of the cached value for `key`.
    ///
    /// An entry past its TTL may still be returned until the next reap tick.
    pub fn lookup(&self, key: &str) -> Option<Vec<u8>> {
        let value = self.inner.store.lock().get(key);
        debug!(key, hit = value.is_some(), "cache lookup");
        value
    }

    // == Close ==
    /// Stops the reaper. Calling it again is a no-op.
    ///
    /// Entries already stored remain readable but are no longer reaped.
    pub fn close(&self) {
        let was_closed = self.inner.shutdown.send_replace(true);
        if !was_closed {
            debug!("cache closed, reaper signalled to stop");
        }
    }

    /// Returns true once [`Cache::close`] has been called.
    pub fn is_closed(&self) -> bool {
        *self.inner.shutdown.borrow()
    }

    /// Returns the time-to-live applied to entries.
    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    /// Returns the period between reap ticks.
    pub fn reap_period(&self) -> Duration {
        self.inner.reap_period
    }

    /// Number of entries currently held, including expired ones awaiting reap.
    pub fn len(&self) -> usize {
        self.inner.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.store.lock().is_empty()
    }
}

fn clamp_interval(value: Duration, what: &str) -> Duration {
    if value.is_zero() {
        warn!("cache {} of zero raised to {:?}", what, MIN_INTERVAL);
        MIN_INTERVAL
    } else if value > MAX_INTERVAL {
        warn!("cache {} of {:?} lowered to {:?}", what, value, MAX_INTERVAL);
        MAX_INTERVAL
    } else {
        value
    }
}
