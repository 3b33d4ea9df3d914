//! Stage store: cached CRUD over the stage endpoints
//!
//! The list endpoint returns stages with their tasks embedded; subscribers
//! registered via [`StageStore::on_stages_loaded`] receive every freshly
//! fetched payload, which is how the task store gets seeded without issuing
//! its own fetch.

use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use super::cache::EntityCache;
use super::locks::IdLocks;
use crate::client::api::StageApi;
use crate::client::models::{CreateStage, Stage};
use crate::error::Result;

/// Callback invoked with every freshly fetched stage payload
pub type StagesLoadedListener = Box<dyn Fn(&[Stage]) + Send + Sync>;

/// Cached store for stages
pub struct StageStore<C: StageApi> {
    api: Arc<C>,
    state: RwLock<EntityCache<Stage>>,
    locks: IdLocks,
    listeners: Mutex<Vec<StagesLoadedListener>>,
}

impl<C: StageApi> StageStore<C> {
    pub fn new(api: Arc<C>, ttl: Duration) -> Self {
        Self {
            api,
            state: RwLock::new(EntityCache::new(ttl)),
            locks: IdLocks::new(),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Subscribe to fresh stage payloads (cache hits do not re-notify)
    pub fn on_stages_loaded(&self, listener: impl Fn(&[Stage]) + Send + Sync + 'static) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(listener));
    }

    /// All stages, served from the collection cache while it is valid
    pub async fn load_all(&self) -> Result<Vec<Stage>> {
        if let Some(stages) = self.read_state(|cache| cache.get_all()).flatten() {
            log::debug!("stage cache hit: all stages");
            return Ok(stages);
        }

        let stages = self.api.list_stages().await?;
        self.write_state(|cache| cache.set_all(stages.clone()));
        self.notify_loaded(&stages);
        Ok(stages)
    }

    /// One stage, served from the per-id cache while valid.
    /// Never consults or populates the collection cache.
    pub async fn fetch_one(&self, id: i64) -> Result<Stage> {
        if let Some(stage) = self.read_state(|cache| cache.get(id)).flatten() {
            log::debug!("stage cache hit: {id}");
            return Ok(stage);
        }

        let stage = self.api.get_stage(id).await?;
        self.write_state(|cache| cache.insert(stage.clone()));
        Ok(stage)
    }

    /// Create a stage; the server-returned entity is authoritative
    pub async fn create(&self, payload: &CreateStage) -> Result<Stage> {
        let created = self.api.create_stage(payload).await?;
        self.write_state(|cache| cache.apply_create(created.clone()));
        Ok(created)
    }

    /// Update a stage and mirror the result into both caches.
    /// A local cache miss is not an error; the server write already stuck.
    pub async fn update(&self, stage: &Stage) -> Result<Stage> {
        let _guard = self.locks.acquire(stage.id).await;

        let updated = self.api.update_stage(stage).await?;
        self.write_state(|cache| {
            let hit_entry = cache.overwrite_entry(&updated);
            let hit_all = cache.replace_in_all(&updated);
            if hit_all {
                cache.touch_all();
            }
            if !hit_entry && !hit_all {
                log::warn!("stage {} updated server-side but absent from local cache", updated.id);
            }
        });
        Ok(updated)
    }

    /// Delete a stage and evict it from both caches
    pub async fn delete(&self, id: i64) -> Result<()> {
        let _guard = self.locks.acquire(id).await;

        self.api.delete_stage(id).await?;
        self.write_state(|cache| cache.remove(id));
        Ok(())
    }

    /// Drop all cache state (test isolation)
    pub fn reset(&self) {
        self.write_state(|cache| cache.clear());
    }

    fn read_state<R>(&self, f: impl FnOnce(&EntityCache<Stage>) -> R) -> Option<R> {
        // a poisoned lock reads as a cache miss
        self.state.read().ok().map(|cache| f(&cache))
    }

    fn write_state(&self, f: impl FnOnce(&mut EntityCache<Stage>)) {
        if let Ok(mut cache) = self.state.write() {
            f(&mut cache);
        }
    }

    fn notify_loaded(&self, stages: &[Stage]) {
        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for listener in listeners.iter() {
            listener(stages);
        }
    }
}
