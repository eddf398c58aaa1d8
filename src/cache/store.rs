//! Cache Store Module
//!
//! Plain keyed storage with TTL bookkeeping. Not thread-safe on its own;
//! [`Cache`](crate::cache::Cache) wraps it in a mutex.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::CacheEntry;

// == Cache Store ==
/// Keyed storage for cached payloads with a fixed time-to-live.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Age at which an entry becomes eligible for reaping
    interval: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries expire after `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            interval,
        }
    }

    // == Set ==
    /// Stores a value under `key`, stamped with `now`.
    ///
    /// Overwriting replaces both the value and the timestamp, restarting the TTL.
    pub fn set(&mut self, key: String, value: Vec<u8>, now: Instant) {
        self.entries.insert(key, CacheEntry::at(value, now));
    }

    // == Get ==
    /// Returns a copy of the value for `key` if present.
    ///
    /// Entries past their TTL are still returned until the next reap.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Cleanup Expired ==
    /// Removes every entry whose age is at least the interval.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let interval = self.interval;
        self.entries.retain(|_, entry| !entry.is_expired(interval, now));
        before - self.entries.len()
    }

    /// Returns the configured time-to-live.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    // == Length ==
    /// Returns the current number of entries, including expired ones not yet reaped.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(5);

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(TTL);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.interval(), TTL);
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new(TTL);

        store.set("key1".to_string(), b"value1".to_vec(), Instant::now());

        assert_eq!(store.get("key1"), Some(b"value1".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store = CacheStore::new(TTL);
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new(TTL);
        let now = Instant::now();

        store.set("key1".to_string(), b"value1".to_vec(), now);
        store.set("key1".to_string(), b"value2".to_vec(), now);

        assert_eq!(store.get("key1"), Some(b"value2".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_restarts_ttl() {
        let mut store = CacheStore::new(TTL);
        let t0 = Instant::now();

        store.set("key1".to_string(), b"old".to_vec(), t0);
        store.set("key1".to_string(), b"new".to_vec(), t0 + Duration::from_secs(3));

        // Five seconds after the first write, but only two after the second
        assert_eq!(store.cleanup_expired(t0 + TTL), 0);
        assert_eq!(store.get("key1"), Some(b"new".to_vec()));

        assert_eq!(store.cleanup_expired(t0 + Duration::from_secs(8)), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_get_returns_expired_until_reaped() {
        let mut store = CacheStore::new(TTL);
        let t0 = Instant::now();

        store.set("key1".to_string(), b"value1".to_vec(), t0);

        // Logically expired, still served
        assert_eq!(store.get("key1"), Some(b"value1".to_vec()));
        assert_eq!(store.cleanup_expired(t0 + TTL), 1);
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = CacheStore::new(TTL);
        let t0 = Instant::now();

        store.set("a".to_string(), b"1".to_vec(), t0);
        store.set("b".to_string(), b"2".to_vec(), t0 + Duration::from_secs(1));

        let removed = store.cleanup_expired(t0 + TTL);
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), Some(b"2".to_vec()));
    }

    #[test]
    fn test_store_cleanup_empty() {
        let mut store = CacheStore::new(TTL);
        assert_eq!(store.cleanup_expired(Instant::now()), 0);
    }
}
