//! Task store: cached CRUD, batch update, and historization
//!
//! Active and historized views are projections of the same cached
//! collection, recomputed on every read. Archiving keeps a separate
//! historized-tasks cache on the side so the archived card can be shown
//! without refetching the whole collection.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::Utc;

use super::cache::EntityCache;
use super::entry::{CacheEntry, is_cache_valid};
use super::locks::IdLocks;
use crate::client::api::TaskApi;
use crate::client::models::{CreateTask, Stage, Task};
use crate::error::Result;

/// Cached store for tasks
pub struct TaskStore<C: TaskApi> {
    api: Arc<C>,
    state: RwLock<TaskState>,
    locks: IdLocks,
}

struct TaskState {
    cache: EntityCache<Task>,
    /// Archived cards collected by [`TaskStore::archive`]
    historized: Option<CacheEntry<Vec<Task>>>,
}

impl TaskState {
    /// Freshest cached copy of a task, comparing the per-id entry against
    /// the collection entry by capture timestamp. Validity is ignored: a
    /// stale copy still beats a refetch as a derivation base.
    fn freshest_copy(&self, id: i64) -> Option<Task> {
        let from_entry = self
            .cache
            .peek_entry(id)
            .map(|e| (e.timestamp(), e.data().clone()));
        let from_all = self.cache.peek_all().and_then(|entry| {
            entry
                .data()
                .iter()
                .find(|t| t.id == id)
                .map(|t| (entry.timestamp(), t.clone()))
        });

        match (from_entry, from_all) {
            (Some((entry_at, entry)), Some((all_at, all))) => {
                Some(if entry_at >= all_at { entry } else { all })
            }
            (Some((_, entry)), None) => Some(entry),
            (None, Some((_, all))) => Some(all),
            (None, None) => None,
        }
    }

    /// Append to the historized cache: created fresh when absent, appended
    /// while valid, replaced wholesale once expired.
    fn push_historized(&mut self, task: Task) {
        let ttl = self.cache.ttl();
        match self.historized.as_mut() {
            Some(entry) if entry.age() <= ttl => entry.data_mut().push(task),
            _ => self.historized = Some(CacheEntry::new(vec![task])),
        }
    }
}

impl<C: TaskApi> TaskStore<C> {
    pub fn new(api: Arc<C>, ttl: Duration) -> Self {
        Self {
            api,
            state: RwLock::new(TaskState {
                cache: EntityCache::new(ttl),
                historized: None,
            }),
            locks: IdLocks::new(),
        }
    }

    /// All tasks, served from the collection cache while it is valid
    pub async fn load_all(&self) -> Result<Vec<Task>> {
        if let Some(tasks) = self.read_state(|state| state.cache.get_all()).flatten() {
            log::debug!("task cache hit: all tasks");
            return Ok(tasks);
        }

        let tasks = self.api.list_tasks().await?;
        self.write_state(|state| state.cache.set_all(tasks.clone()));
        Ok(tasks)
    }

    /// One task, served from the per-id cache while valid.
    /// Never consults or populates the collection cache.
    pub async fn fetch_one(&self, id: i64) -> Result<Task> {
        if let Some(task) = self.read_state(|state| state.cache.get(id)).flatten() {
            log::debug!("task cache hit: {id}");
            return Ok(task);
        }

        let task = self.api.get_task(id).await?;
        self.write_state(|state| state.cache.insert(task.clone()));
        Ok(task)
    }

    /// Create a task; the server-returned entity is authoritative for the
    /// id and historization fields.
    pub async fn create(&self, payload: &CreateTask) -> Result<Task> {
        let created = self.api.create_task(payload).await?;
        self.write_state(|state| state.cache.apply_create(created.clone()));
        Ok(created)
    }

    /// Update a task and mirror the result into both caches.
    /// A local cache miss is not an error; the server write already stuck.
    pub async fn update(&self, task: &Task) -> Result<Task> {
        let _guard = self.locks.acquire(task.id).await;

        let updated = self.api.update_task(task).await?;
        self.write_state(|state| {
            let hit_entry = state.cache.overwrite_entry(&updated);
            let hit_all = state.cache.replace_in_all(&updated);
            if hit_all {
                state.cache.touch_all();
            }
            if !hit_entry && !hit_all {
                log::warn!("task {} updated server-side but absent from local cache", updated.id);
            }
        });
        Ok(updated)
    }

    /// Batch-update tasks in one round trip. Empty input is a no-op with
    /// zero network calls. Each returned entity mirrors the single-update
    /// cache path; the collection stamp moves once for the whole batch.
    pub async fn update_batch(&self, tasks: &[Task]) -> Result<Vec<Task>> {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
        let _guards = self.locks.acquire_many(&ids).await;

        let updated = self.api.update_tasks(tasks).await?;
        self.write_state(|state| {
            for task in &updated {
                let hit_entry = state.cache.overwrite_entry(task);
                let hit_all = state.cache.replace_in_all(task);
                if !hit_entry && !hit_all {
                    log::warn!("task {} updated server-side but absent from local cache", task.id);
                }
            }
            state.cache.touch_all();
        });
        Ok(updated)
    }

    /// Delete a task and evict it from both caches
    pub async fn delete(&self, id: i64) -> Result<()> {
        let _guard = self.locks.acquire(id).await;

        self.api.delete_task(id).await?;
        self.write_state(|state| state.cache.remove(id));
        Ok(())
    }

    /// Archive a task: mark it historized server-side, then derive the
    /// historized value locally from the freshest cached copy (falling back
    /// to a fetch when nothing is cached). The per-id entry is dropped —
    /// historized tasks are no longer individually cache-addressable — while
    /// the collection element is updated in place.
    pub async fn archive(&self, id: i64) -> Result<Task> {
        let _guard = self.locks.acquire(id).await;

        self.api.historize_task(id).await?;

        let base = self.read_state(|state| state.freshest_copy(id)).flatten();
        let base = match base {
            Some(task) => task,
            None => self.api.get_task(id).await?,
        };

        let mut archived = base;
        archived.is_historized = true;
        archived.historization_date = Some(Utc::now());

        self.write_state(|state| {
            state.cache.remove_entry(id);
            if state.cache.replace_in_all(&archived) {
                state.cache.touch_all();
            }
            state.push_historized(archived.clone());
        });

        Ok(archived)
    }

    /// Copy the tasks embedded in a stage payload into the collection
    /// cache. Wired to [`super::stage::StageStore::on_stages_loaded`] by the
    /// store container.
    pub fn seed_from_stages(&self, stages: &[Stage]) {
        let tasks: Vec<Task> = stages
            .iter()
            .flat_map(|stage| stage.tasks.iter().cloned())
            .collect();
        log::debug!("seeding task cache with {} tasks from stage payload", tasks.len());
        self.write_state(|state| state.cache.set_all(tasks));
    }

    /// Active view: the cached collection minus historized tasks.
    /// `None` when the collection cache is absent or expired.
    pub fn active_tasks(&self) -> Option<Vec<Task>> {
        self.read_state(|state| {
            state
                .cache
                .get_all()
                .map(|all| all.into_iter().filter(|t| !t.is_historized).collect())
        })
        .flatten()
    }

    /// Historized view: the archive-maintained cache when valid, otherwise
    /// the historized slice of the cached collection.
    pub fn historized_tasks(&self) -> Option<Vec<Task>> {
        self.read_state(|state| {
            if is_cache_valid(state.historized.as_ref(), state.cache.ttl()) {
                return state.historized.as_ref().map(|e| e.data().clone());
            }
            state
                .cache
                .get_all()
                .map(|all| all.into_iter().filter(|t| t.is_historized).collect())
        })
        .flatten()
    }

    /// Drop all cache state (test isolation)
    pub fn reset(&self) {
        self.write_state(|state| {
            state.cache.clear();
            state.historized = None;
        });
    }

    fn read_state<R>(&self, f: impl FnOnce(&TaskState) -> R) -> Option<R> {
        // a poisoned lock reads as a cache miss
        self.state.read().ok().map(|state| f(&state))
    }

    fn write_state(&self, f: impl FnOnce(&mut TaskState)) {
        if let Ok(mut state) = self.state.write() {
            f(&mut state);
        }
    }
}
