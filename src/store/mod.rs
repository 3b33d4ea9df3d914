//! Entity stores: in-memory TTL caches in front of the board API
//!
//! Each store owns a per-id cache and an "all entities" cache for one
//! entity type. Mutations go to the server first; the server response is
//! authoritative and gets mirrored into whichever caches hold the entity.
//! Nothing here persists across process restarts.

pub mod cache;
pub mod entry;
pub mod locks;
pub mod stage;
pub mod task;

use std::sync::Arc;
use std::time::Duration;

pub use cache::{Entity, EntityCache};
pub use entry::{CacheEntry, is_cache_valid};
pub use stage::StageStore;
pub use task::TaskStore;

use crate::client::api::BoardApi;

/// Explicit container owning both store instances.
///
/// Construction wires the cross-store coordination: every fresh stage
/// payload is pushed into the task store's collection cache, so loading the
/// board never issues a redundant task fetch.
pub struct Stores<C: BoardApi> {
    pub stages: Arc<StageStore<C>>,
    pub tasks: Arc<TaskStore<C>>,
}

impl<C: BoardApi + 'static> Stores<C> {
    pub fn new(api: Arc<C>, ttl: Duration) -> Self {
        let stages = Arc::new(StageStore::new(Arc::clone(&api), ttl));
        let tasks = Arc::new(TaskStore::new(api, ttl));

        let sink = Arc::clone(&tasks);
        stages.on_stages_loaded(move |loaded| sink.seed_from_stages(loaded));

        Self { stages, tasks }
    }

    /// Drop all cache state in both stores (test isolation)
    pub fn reset(&self) {
        self.stages.reset();
        self.tasks.reset();
    }
}
