//! LRU Tracker Module
//!
//! Recency bookkeeping used to pick eviction victims.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Tracks access order for LRU eviction.
///
/// Every touch stamps the key with the next value of a monotonic clock.
/// `order` maps stamps to keys, so the smallest stamp is the least recently
/// used key. Both maps always hold the same set of keys.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Latest stamp of each tracked key
    stamps: HashMap<String, u64>,
    /// Keys ordered by stamp, oldest first
    order: BTreeMap<u64, String>,
    /// Next stamp to hand out
    clock: u64,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used, tracking it if it is new.
    pub fn touch(&mut self, key: &str) {
        let stamp = self.clock;
        self.clock += 1;

        match self.stamps.get_mut(key) {
            Some(previous) => {
                let old = std::mem::replace(previous, stamp);
                let owned = self.order.remove(&old).unwrap_or_else(|| key.to_string());
                self.order.insert(stamp, owned);
            }
            None => {
                self.stamps.insert(key.to_string(), stamp);
                self.order.insert(stamp, key.to_string());
            }
        }
    }

    // == Remove ==
    /// Stops tracking a key. Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) {
        if let Some(stamp) = self.stamps.remove(key) {
            self.order.remove(&stamp);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.stamps.remove(&key);
        Some(key)
    }

    /// Number of tracked keys.
    pub(super) fn len(&self) -> usize {
        self.stamps.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    #[cfg(test)]
    fn peek_oldest(&self) -> Option<&str> {
        self.order.first_key_value().map(|(_, key)| key.as_str())
    }

    #[cfg(test)]
    fn contains(&self, key: &str) -> bool {
        self.stamps.contains_key(key)
    }
}
