//! Bounded Map Module
//!
//! HashMap storage capped at a fixed number of live entries, evicting the
//! least recently used key when an insert would exceed the cap.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, StoreError};
use crate::storage::LruTracker;

// == Bounded Map ==
/// Size-capped map from string keys to values.
///
/// Lookups through [`get`](Self::get) and [`get_mut`](Self::get_mut) count as
/// uses for eviction purposes; [`peek`](Self::peek) does not.
#[derive(Debug)]
pub struct BoundedMap<V> {
    /// Key-value storage
    entries: HashMap<String, V>,
    /// LRU access tracker
    lru: LruTracker,
    /// Maximum number of live entries
    capacity: usize,
    /// Number of entries evicted so far
    evictions: u64,
}

impl<V> BoundedMap<V> {
    // == Constructor ==
    /// Creates an empty map holding at most `capacity` entries.
    ///
    /// Fails with `InvalidConfiguration` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(StoreError::InvalidConfiguration(
                "capacity must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            capacity,
            evictions: 0,
        })
    }

    // == Insert ==
    /// Inserts or overwrites `key`, evicting the least recently used entry
    /// when a new key would exceed the capacity.
    ///
    /// Overwriting an existing key never evicts.
    pub fn insert(&mut self, key: String, value: V) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            if let Some(victim) = self.lru.evict_oldest() {
                if self.entries.remove(&victim).is_some() {
                    debug!(
                        "Evicted key '{}' to stay within capacity {}",
                        victim, self.capacity
                    );
                    self.evictions += 1;
                }
            }
        }

        self.lru.touch(&key);
        self.entries.insert(key, value);
        debug_assert_eq!(self.lru.len(), self.entries.len());
    }

    // == Get ==
    /// Returns the value for `key` and marks it recently used.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        if self.entries.contains_key(key) {
            self.lru.touch(key);
        }
        self.entries.get(key)
    }

    // == Get Mut ==
    /// Returns a mutable reference to the value for `key` and marks it recently used.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        if self.entries.contains_key(key) {
            self.lru.touch(key);
        }
        self.entries.get_mut(key)
    }

    // == Peek ==
    /// Returns the value for `key` without affecting eviction order.
    pub fn peek(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    // == Remove ==
    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.lru.remove(key);
        }
        removed
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total number of evictions since construction.
    pub fn evictions(&self) -> u64 {
        self.evictions
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        let result = BoundedMap::<i32>::new(0);
        assert!(matches!(result, Err(StoreError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_insert_and_get() {
        let mut map = BoundedMap::new(4).unwrap();

        map.insert("a".to_string(), 1);
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_eviction_removes_least_recent() {
        let mut map = BoundedMap::new(3).unwrap();

        map.insert("key1".to_string(), 1);
        map.insert("key2".to_string(), 2);
        map.insert("key3".to_string(), 3);

        map.insert("key4".to_string(), 4);

        assert_eq!(map.len(), 3);
        assert!(!map.contains_key("key1"));
        assert_eq!(map.evictions(), 1);
    }

    #[test]
    fn test_get_protects_from_eviction() {
        let mut map = BoundedMap::new(3).unwrap();

        map.insert("key1".to_string(), 1);
        map.insert("key2".to_string(), 2);
        map.insert("key3".to_string(), 3);
        map.get("key1");

        map.insert("key4".to_string(), 4);

        assert!(map.contains_key("key1"));
        assert!(!map.contains_key("key2"));
    }

    #[test]
    fn test_peek_does_not_touch() {
        let mut map = BoundedMap::new(2).unwrap();

        map.insert("key1".to_string(), 1);
        map.insert("key2".to_string(), 2);
        assert_eq!(map.peek("key1"), Some(&1));

        map.insert("key3".to_string(), 3);
        assert!(!map.contains_key("key1"));
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let mut map = BoundedMap::new(2).unwrap();

        map.insert("key1".to_string(), 1);
        map.insert("key2".to_string(), 2);
        map.insert("key1".to_string(), 10);

        assert_eq!(map.len(), 2);
        assert_eq!(map.peek("key1"), Some(&10));
        assert_eq!(map.evictions(), 0);
    }

    #[test]
    fn test_remove_frees_a_slot() {
        let mut map = BoundedMap::new(1).unwrap();

        map.insert("key1".to_string(), 1);
        assert_eq!(map.remove("key1"), Some(1));
        assert_eq!(map.remove("key1"), None);
        assert!(map.is_empty());

        map.insert("key2".to_string(), 2);
        assert_eq!(map.evictions(), 0);
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut map = BoundedMap::new(2).unwrap();

        map.insert("n".to_string(), 1);
        if let Some(v) = map.get_mut("n") {
            *v += 41;
        }
        assert_eq!(map.peek("n"), Some(&42));
    }
}
