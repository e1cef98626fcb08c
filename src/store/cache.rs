//! Keyed query cache shared by the data hooks.
//!
//! Entries are keyed by (entity, owner, optional project scope) and hold the
//! last fetched list for that key. Data only ever enters the cache through
//! [`QueryCache::get_or_fetch`]; mutations never write entries, they
//! invalidate them and the next read refetches.
//!
//! Each key has a generation counter. Invalidation bumps it, and a fetch
//! stores its result only if the generation it started under is still
//! current, so a read racing with a mutation cannot reinstate stale rows.

use crate::libs::{project::Project, task::Task};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Tasks,
    Projects,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub entity: Entity,
    pub user_id: String,
    pub scope: Option<String>,
}

impl CacheKey {
    pub fn tasks(user_id: &str, scope: Option<&str>) -> Self {
        Self {
            entity: Entity::Tasks,
            user_id: user_id.to_string(),
            scope: scope.map(str::to_string),
        }
    }

    pub fn projects(user_id: &str) -> Self {
        Self {
            entity: Entity::Projects,
            user_id: user_id.to_string(),
            scope: None,
        }
    }
}

/// Cached list for one key.
#[derive(Debug, Clone)]
pub enum CacheEntry {
    Tasks(Vec<Task>),
    Projects(Vec<Project>),
}

/// Types that can live in the cache.
pub trait Cached: Sized + Clone {
    fn into_entry(items: Vec<Self>) -> CacheEntry;
    fn from_entry(entry: &CacheEntry) -> Option<Vec<Self>>;
}

impl Cached for Task {
    fn into_entry(items: Vec<Self>) -> CacheEntry {
        CacheEntry::Tasks(items)
    }

    fn from_entry(entry: &CacheEntry) -> Option<Vec<Self>> {
        match entry {
            CacheEntry::Tasks(tasks) => Some(tasks.clone()),
            _ => None,
        }
    }
}

impl Cached for Project {
    fn into_entry(items: Vec<Self>) -> CacheEntry {
        CacheEntry::Projects(items)
    }

    fn from_entry(entry: &CacheEntry) -> Option<Vec<Self>> {
        match entry {
            CacheEntry::Projects(projects) => Some(projects.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Slots {
    entries: HashMap<CacheKey, CacheEntry>,
    generations: HashMap<CacheKey, u64>,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    slots: Mutex<Slots>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached list for `key` without fetching.
    pub fn peek<T: Cached>(&self, key: &CacheKey) -> Option<Vec<T>> {
        self.slots.lock().entries.get(key).and_then(T::from_entry)
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.slots.lock().entries.contains_key(key)
    }

    /// Returns the cached list for `key`, fetching and storing it on a miss.
    ///
    /// A fetch error is returned as is and leaves the cache untouched.
    pub async fn get_or_fetch<T, E, F, Fut>(&self, key: &CacheKey, fetch: F) -> Result<Vec<T>, E>
    where
        T: Cached,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
    {
        let generation = {
            let mut slots = self.slots.lock();
            if let Some(items) = slots.entries.get(key).and_then(T::from_entry) {
                return Ok(items);
            }
            // Register the key so entity-wide invalidation sees in-flight fetches.
            *slots.generations.entry(key.clone()).or_insert(0)
        };

        let items = fetch().await?;

        let mut slots = self.slots.lock();
        if slots.generations.get(key).copied().unwrap_or(0) == generation {
            slots.entries.insert(key.clone(), T::into_entry(items.clone()));
        }
        Ok(items)
    }

    pub fn invalidate(&self, key: &CacheKey) {
        let mut slots = self.slots.lock();
        slots.entries.remove(key);
        *slots.generations.entry(key.clone()).or_insert(0) += 1;
    }

    /// Invalidates every entry of `entity` owned by `user_id`, whatever its scope.
    pub fn invalidate_entity(&self, entity: Entity, user_id: &str) {
        let mut slots = self.slots.lock();
        let keys: Vec<CacheKey> = slots.generations.keys().filter(|key| key.entity == entity && key.user_id == user_id).cloned().collect();
        for key in keys {
            slots.entries.remove(&key);
            *slots.generations.entry(key).or_insert(0) += 1;
        }
    }
}
