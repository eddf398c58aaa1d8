//! Cache Module
//!
//! In-memory cache of raw response bodies with fixed TTL expiry and a
//! background reaper.

mod entry;
mod handle;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::Cache;
pub use store::CacheStore;

use std::time::Duration;

// == Public Constants ==
/// Smallest TTL or reap period a cache will run with
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Largest TTL or reap period a cache will run with, roughly 30 years
pub const MAX_INTERVAL: Duration = Duration::from_secs(86400 * 365 * 30);
