//! Per-id serialization of mutating store operations
//!
//! A mutating operation's read-modify-write spans an await on the network;
//! two writers targeting the same id must not interleave those segments.
//! Each id gets its own async mutex, created on first use.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Lazily-populated map of per-id async locks
#[derive(Debug, Default)]
pub struct IdLocks {
    locks: Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>,
}

impl IdLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for one id, waiting behind any writer already
    /// holding it.
    pub async fn acquire(&self, id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self
                .locks
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(id).or_default())
        };
        lock.lock_owned().await
    }

    /// Acquire locks for a batch of ids, in ascending id order so two
    /// overlapping batches cannot deadlock.
    pub async fn acquire_many(&self, ids: &[i64]) -> Vec<OwnedMutexGuard<()>> {
        let mut sorted = ids.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut guards = Vec::with_capacity(sorted.len());
        for id in sorted {
            guards.push(self.acquire(id).await);
        }
        guards
    }
}
