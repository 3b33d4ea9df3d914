//! Generic per-entity cache state
//!
//! Owns the per-id map and the optional "all entities" entry for one entity
//! type, along with the mutation rules that keep the two consistent. The
//! stores wrap this in a lock and layer the network calls on top.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::entry::{CacheEntry, is_cache_valid};
use crate::client::models::{Stage, Task};

/// An entity with a stable server-assigned ID
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;
}

impl Entity for Stage {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Entity for Task {
    fn id(&self) -> i64 {
        self.id
    }
}

/// In-memory cache state for one entity type
#[derive(Debug)]
pub struct EntityCache<T> {
    entities: HashMap<i64, CacheEntry<T>>,
    all: Option<CacheEntry<Vec<T>>>,
    ttl: Duration,
    last_fetch: Option<Instant>,
}

impl<T: Entity> EntityCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entities: HashMap::new(),
            all: None,
            ttl,
            last_fetch: None,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn last_fetch(&self) -> Option<Instant> {
        self.last_fetch
    }

    /// Valid per-id entry, if any. An expired entry reads as a miss.
    pub fn get(&self, id: i64) -> Option<T> {
        let entry = self.entities.get(&id);
        if is_cache_valid(entry, self.ttl) {
            entry.map(|e| e.data().clone())
        } else {
            None
        }
    }

    /// Valid "all entities" collection, if any
    pub fn get_all(&self) -> Option<Vec<T>> {
        if is_cache_valid(self.all.as_ref(), self.ttl) {
            self.all.as_ref().map(|e| e.data().clone())
        } else {
            None
        }
    }

    /// Per-id entry regardless of validity
    pub fn peek_entry(&self, id: i64) -> Option<&CacheEntry<T>> {
        self.entities.get(&id)
    }

    /// "All entities" entry regardless of validity
    pub fn peek_all(&self) -> Option<&CacheEntry<Vec<T>>> {
        self.all.as_ref()
    }

    /// Store a freshly fetched entity under its id
    pub fn insert(&mut self, entity: T) {
        self.entities.insert(entity.id(), CacheEntry::new(entity));
    }

    /// Replace the "all entities" collection wholesale, stamped now
    pub fn set_all(&mut self, entities: Vec<T>) {
        self.all = Some(CacheEntry::new(entities));
        self.last_fetch = Some(Instant::now());
    }

    /// Restamp the "all entities" entry after a confirmed mutation
    pub fn touch_all(&mut self) {
        if let Some(all) = self.all.as_mut() {
            all.touch();
        }
    }

    /// Record a server-confirmed creation: fresh per-id entry, appended to
    /// the collection when one is cached, otherwise the collection is
    /// initialized with the singleton.
    pub fn apply_create(&mut self, entity: T) {
        match self.all.as_mut() {
            Some(all) => {
                all.data_mut().push(entity.clone());
                all.touch();
            }
            None => self.all = Some(CacheEntry::new(vec![entity.clone()])),
        }
        self.insert(entity);
    }

    /// Overwrite the per-id entry with a fresh stamp, only if one exists.
    /// Updates never create cache entries.
    pub fn overwrite_entry(&mut self, entity: &T) -> bool {
        if self.entities.contains_key(&entity.id()) {
            self.entities
                .insert(entity.id(), CacheEntry::new(entity.clone()));
            true
        } else {
            false
        }
    }

    /// Replace the matching collection element in place (id-equality scan).
    /// Does not restamp; callers decide when the collection stamp moves.
    pub fn replace_in_all(&mut self, entity: &T) -> bool {
        if let Some(all) = self.all.as_mut() {
            if let Some(slot) = all.data_mut().iter_mut().find(|e| e.id() == entity.id()) {
                *slot = entity.clone();
                return true;
            }
        }
        false
    }

    /// Remove from both caches after a confirmed deletion, restamping the
    /// collection entry.
    pub fn remove(&mut self, id: i64) {
        self.entities.remove(&id);
        if let Some(all) = self.all.as_mut() {
            all.data_mut().retain(|e| e.id() != id);
            all.touch();
        }
    }

    /// Drop the per-id entry only; the collection is untouched
    pub fn remove_entry(&mut self, id: i64) {
        self.entities.remove(&id);
    }

    /// Drop all cache state
    pub fn clear(&mut self) {
        self.entities.clear();
        self.all = None;
        self.last_fetch = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, title: &str) -> Task {
        Task {
            id,
            stage_id: 1,
            stage: "Backlog".to_string(),
            version: "1.0".to_string(),
            description: String::new(),
            title: title.to_string(),
            position: 0,
            redmine: None,
            is_historized: false,
            historization_date: None,
        }
    }

    fn cache() -> EntityCache<Task> {
        EntityCache::new(Duration::from_secs(60))
    }

    #[test]
    fn test_get_returns_none_when_absent() {
        assert!(cache().get(1).is_none());
    }

    #[test]
    fn test_insert_then_get() {
        let mut cache = cache();
        cache.insert(task(1, "a"));
        assert_eq!(cache.get(1).map(|t| t.title), Some("a".to_string()));
    }

    #[test]
    fn test_expired_entry_reads_as_miss() {
        let mut cache = EntityCache::new(Duration::from_millis(10));
        cache.insert(task(1, "a"));
        std::thread::sleep(Duration::from_millis(25));
        assert!(cache.get(1).is_none());
        // the stale entry is still physically present for derivations
        assert!(cache.peek_entry(1).is_some());
    }

    #[test]
    fn test_set_all_updates_last_fetch() {
        let mut cache = cache();
        assert!(cache.last_fetch().is_none());
        cache.set_all(vec![task(1, "a")]);
        assert!(cache.last_fetch().is_some());
        assert_eq!(cache.get_all().map(|all| all.len()), Some(1));
    }

    #[test]
    fn test_apply_create_appends_to_cached_collection() {
        let mut cache = cache();
        cache.set_all(vec![task(1, "a")]);
        cache.apply_create(task(2, "b"));

        let all = cache.get_all().expect("all cache");
        assert_eq!(all.len(), 2);
        assert!(cache.get(2).is_some());
    }

    #[test]
    fn test_apply_create_initializes_singleton_collection() {
        let mut cache = cache();
        cache.apply_create(task(7, "only"));

        let all = cache.get_all().expect("all cache");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, 7);
    }

    #[test]
    fn test_overwrite_entry_never_creates() {
        let mut cache = cache();
        assert!(!cache.overwrite_entry(&task(1, "a")));
        assert!(cache.get(1).is_none());

        cache.insert(task(1, "a"));
        assert!(cache.overwrite_entry(&task(1, "a2")));
        assert_eq!(cache.get(1).map(|t| t.title), Some("a2".to_string()));
    }

    #[test]
    fn test_replace_in_all_scans_by_id() {
        let mut cache = cache();
        cache.set_all(vec![task(1, "a"), task(2, "b")]);

        assert!(cache.replace_in_all(&task(2, "b2")));
        assert!(!cache.replace_in_all(&task(3, "missing")));

        let all = cache.get_all().expect("all cache");
        assert_eq!(all[1].title, "b2");
    }

    #[test]
    fn test_remove_clears_both_caches() {
        let mut cache = cache();
        cache.set_all(vec![task(1, "a"), task(2, "b")]);
        cache.insert(task(1, "a"));

        cache.remove(1);

        assert!(cache.get(1).is_none());
        assert!(cache.peek_entry(1).is_none());
        let all = cache.get_all().expect("all cache");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, 2);
    }

    #[test]
    fn test_remove_entry_leaves_collection_alone() {
        let mut cache = cache();
        cache.set_all(vec![task(1, "a")]);
        cache.insert(task(1, "a"));

        cache.remove_entry(1);

        assert!(cache.peek_entry(1).is_none());
        assert_eq!(cache.get_all().map(|all| all.len()), Some(1));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cache = cache();
        cache.set_all(vec![task(1, "a")]);
        cache.insert(task(2, "b"));

        cache.clear();

        assert!(cache.get(2).is_none());
        assert!(cache.get_all().is_none());
        assert!(cache.last_fetch().is_none());
    }
}
