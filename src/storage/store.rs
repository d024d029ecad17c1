//! Storage Module
//!
//! The store itself: a bounded map of typed values behind a single lock,
//! plus the scalar operations. List and set operations live in their own
//! modules as further `impl Storage` blocks.

use parking_lot::{Mutex, MutexGuard};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::error::{Result, StoreError};
use crate::storage::{BoundedMap, StoreStats, Value};

// == Storage ==
/// Thread-safe typed key-value store with a fixed entry capacity.
///
/// Every public operation holds the store lock for its whole duration, so
/// multi-key operations such as `sinterstore` or `smove` are atomic with
/// respect to each other and to eviction.
#[derive(Debug)]
pub struct Storage {
    pub(super) inner: Mutex<Inner>,
}

/// State guarded by the store lock.
#[derive(Debug)]
pub(super) struct Inner {
    pub(super) map: BoundedMap<Value>,
    /// Random source for `spop` / `srandmember`
    pub(super) rng: StdRng,
    pub(super) stats: StoreStats,
}

impl Storage {
    // == Constructors ==
    /// Creates a store holding at most `capacity` entries, with an OS-seeded
    /// random source.
    ///
    /// Fails with `InvalidConfiguration` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_rng(capacity, StdRng::from_os_rng())
    }

    /// Creates a store whose random member selection is reproducible.
    pub fn with_seed(capacity: usize, seed: u64) -> Result<Self> {
        Self::with_rng(capacity, StdRng::seed_from_u64(seed))
    }

    fn with_rng(capacity: usize, rng: StdRng) -> Result<Self> {
        let map = BoundedMap::new(capacity)?;
        info!("Storage created with capacity {}", capacity);

        Ok(Self {
            inner: Mutex::new(Inner {
                map,
                rng,
                stats: StoreStats::new(),
            }),
        })
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock()
    }

    // == Store ==
    /// Inserts a new entry, coercing integer-looking strings to `Integer`.
    ///
    /// Fails with `DuplicatedKey` if the key already exists; the existing
    /// value is left untouched. May evict another entry when at capacity.
    pub fn store(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        let mut inner = self.lock();

        if inner.map.contains_key(key) {
            return Err(StoreError::DuplicatedKey(key.to_string()));
        }

        inner.map.insert(key.to_string(), value.into().coerce());
        Ok(())
    }

    // == Get ==
    /// Returns a copy of the value stored at `key`.
    pub fn get(&self, key: &str) -> Result<Value> {
        let mut inner = self.lock();

        match inner.map.get(key).cloned() {
            Some(value) => {
                inner.stats.record_hit();
                Ok(value)
            }
            None => {
                inner.stats.record_miss();
                Err(StoreError::NonExistentKey(key.to_string()))
            }
        }
    }

    // == Remove ==
    /// Deletes the entry at `key`.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.lock()
            .map
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NonExistentKey(key.to_string()))
    }

    // == Replace ==
    /// Overwrites an existing entry of any type, with the same coercion as `store`.
    ///
    /// A missing key is left absent; the return value tells whether anything
    /// was replaced.
    pub fn replace(&self, key: &str, value: impl Into<Value>) -> bool {
        match self.lock().map.get_mut(key) {
            Some(slot) => {
                *slot = value.into().coerce();
                true
            }
            None => false,
        }
    }

    // == Introspection ==
    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().map.contains_key(key)
    }

    /// Current number of live entries.
    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().map.is_empty()
    }

    /// Maximum number of live entries.
    pub fn capacity(&self) -> usize {
        self.lock().map.capacity()
    }

    // == Stats ==
    /// Returns a snapshot of the store statistics.
    pub fn stats(&self) -> StoreStats {
        let inner = self.lock();
        let mut stats = inner.stats.clone();
        stats.evictions = inner.map.evictions();
        stats.total_entries = inner.map.len();
        stats
    }
}
