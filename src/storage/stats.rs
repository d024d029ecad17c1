//! Store Statistics Module
//!
//! Tracks lookup hits and misses, evictions, and the live entry count.

use serde::Serialize;

// == Store Stats ==
/// Snapshot of store activity counters.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct StoreStats {
    /// Number of `get` calls that found their key
    pub hits: u64,
    /// Number of `get` calls on a missing key
    pub misses: u64,
    /// Number of entries evicted to respect the capacity
    pub evictions: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
}

impl StoreStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }
}
