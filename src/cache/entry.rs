//! Cache Entry Module
//!
//! Defines a single cached payload together with its insertion time.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A cached payload stamped with the instant it was stored.
///
/// Uses Tokio's clock so that paused-time tests can drive expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Vec<u8>,
    /// When the entry was inserted
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current instant.
    pub fn new(value: Vec<u8>) -> Self {
        Self::at(value, Instant::now())
    }

    /// Creates an entry stamped with the given instant.
    pub fn at(value: Vec<u8>, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    // == Age ==
    /// Returns how long the entry has existed as of `now`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry is eligible for reaping.
    ///
    /// Boundary condition: an entry whose age equals the interval is expired.
    pub fn is_expired(&self, interval: Duration, now: Instant) -> bool {
        self.age(now) >= interval
    }
}
