//! Cache entry primitive
//!
//! Wraps a value with the instant it was last confirmed fresh from the
//! server. Validity is computed against a TTL, never stored.

use std::time::{Duration, Instant};

/// A cached value plus its capture timestamp
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    data: T,
    timestamp: Instant,
}

impl<T> CacheEntry<T> {
    /// Wrap a value just confirmed fresh, stamped now
    pub fn new(data: T) -> Self {
        Self {
            data,
            timestamp: Instant::now(),
        }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    /// Mutable access to the wrapped value; does not restamp
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    /// Time elapsed since the value was confirmed fresh
    pub fn age(&self) -> Duration {
        self.timestamp.elapsed()
    }

    /// Restamp to now, after the server confirmed a mutation
    pub fn touch(&mut self) {
        self.timestamp = Instant::now();
    }
}

/// Whether a cache entry is still valid under the given TTL.
///
/// Returns false for an absent entry; otherwise true iff
/// `now - entry.timestamp <= ttl`. Pure and total.
pub fn is_cache_valid<T>(entry: Option<&CacheEntry<T>>, ttl: Duration) -> bool {
    match entry {
        None => false,
        Some(entry) => entry.age() <= ttl,
    }
}
