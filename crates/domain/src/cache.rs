//! Process-local memoization shared by the fetcher and the orchestrator.

use crate::identity::{Identity, PairKey};
use crate::types::{BlendResult, PostList};
use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;

/// Concurrent in-memory map from key to shared, immutable value.
///
/// Entries live as long as the cache instance: there is no expiry and no
/// eviction. Writes are plain overwrites, so two racing writers for the same
/// key simply leave the last value in place.
#[derive(Debug)]
pub struct MemoryCache<K, V>
where
    K: Eq + Hash,
{
    entries: DashMap<K, Arc<V>>,
}

impl<K, V> MemoryCache<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Look up a value. The returned `Arc` outlives any internal lock.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    pub fn insert(&self, key: K, value: Arc<V>) {
        self.entries.insert(key, value);
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Drop one entry so the next lookup goes back upstream
    pub fn invalidate(&self, key: &K) -> Option<Arc<V>> {
        self.entries.remove(key).map(|(_, value)| value)
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for MemoryCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Identity -> every post fetched for it
pub type PostCache = MemoryCache<Identity, PostList>;

/// Unordered identity pair -> finished blend
pub type BlendCache = MemoryCache<PairKey, BlendResult>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Post;

    fn identity(raw: &str) -> Identity {
        Identity::parse(raw).unwrap()
    }

    #[test]
    fn test_get_returns_shared_value() {
        let cache = PostCache::new();
        let posts = Arc::new(vec![Post::default()]);

        cache.insert(identity("alice"), Arc::clone(&posts));

        let cached = cache.get(&identity("alice")).unwrap();
        assert!(Arc::ptr_eq(&cached, &posts));
        assert!(cache.get(&identity("bob")).is_none());
    }

    #[test]
    fn test_insert_overwrites() {
        let cache: MemoryCache<Identity, u32> = MemoryCache::new();
        cache.insert(identity("alice"), Arc::new(1));
        cache.insert(identity("alice"), Arc::new(2));

        assert_eq!(cache.len(), 1);
        assert_eq!(*cache.get(&identity("alice")).unwrap(), 2);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache: MemoryCache<Identity, u32> = MemoryCache::default();
        cache.insert(identity("alice"), Arc::new(1));
        cache.insert(identity("bob"), Arc::new(2));

        assert_eq!(cache.invalidate(&identity("alice")).as_deref(), Some(&1));
        assert!(!cache.contains_key(&identity("alice")));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_separate_instances_are_isolated() {
        let first: MemoryCache<Identity, u32> = MemoryCache::new();
        let second: MemoryCache<Identity, u32> = MemoryCache::new();

        first.insert(identity("alice"), Arc::new(1));
        assert!(second.get(&identity("alice")).is_none());
    }
}
