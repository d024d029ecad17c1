//! Set Operations
//!
//! Unordered collections of unique values stored as `Value::Set`. A set is
//! created on the first `sadd` to an absent key. The algebra operations read
//! their sources without modifying them; the `*store` variants write the
//! result to a destination key afterwards.

use indexmap::IndexSet;
use rand::Rng;

use crate::error::Result;
use crate::storage::store::Inner;
use crate::storage::{BoundedMap, Storage, Value};

type Members = IndexSet<Value>;

/// Resolves every key to its set, None for absent keys.
///
/// Every key is type-checked before anything is computed, so a non-set value
/// anywhere in `keys` is reported even when an earlier key is absent.
fn lookup_sets<'a, K: AsRef<str>>(
    map: &'a mut BoundedMap<Value>,
    keys: &[K],
) -> Result<Vec<Option<&'a Members>>> {
    for key in keys {
        map.get(key.as_ref());
    }

    let map: &'a BoundedMap<Value> = map;
    keys.iter()
        .map(|key| match map.peek(key.as_ref()) {
            Some(Value::Set(members)) => Ok(Some(members)),
            Some(other) => Err(other.mismatch(key.as_ref(), "set")),
            None => Ok(None),
        })
        .collect()
}

/// Members common to every set. Any absent set makes the result empty.
fn intersection(sets: &[Option<&Members>]) -> Members {
    let present: Option<Vec<&Members>> = sets.iter().copied().collect();
    match present.as_deref() {
        Some([first, rest @ ..]) => first
            .iter()
            .filter(|member| rest.iter().all(|set| set.contains(*member)))
            .cloned()
            .collect(),
        _ => Members::new(),
    }
}

/// Members of any set. Absent sets contribute nothing.
fn union(sets: &[Option<&Members>]) -> Members {
    sets.iter()
        .flatten()
        .flat_map(|set| set.iter())
        .cloned()
        .collect()
}

/// Members of the first set found in none of the others.
fn difference(sets: &[Option<&Members>]) -> Members {
    match sets.split_first() {
        Some((Some(first), rest)) => first
            .iter()
            .filter(|member| !rest.iter().flatten().any(|set| set.contains(*member)))
            .cloned()
            .collect(),
        _ => Members::new(),
    }
}

type SetAlgebra = fn(&[Option<&Members>]) -> Members;

impl Storage {
    // == Add ==
    /// Adds `member` to the set at `key`, creating the set if needed.
    ///
    /// Returns true if the member was new, false if it was already present.
    pub fn sadd(&self, key: &str, member: impl Into<Value>) -> Result<bool> {
        let mut inner = self.lock();
        let map = &mut inner.map;

        match map.get_mut(key) {
            Some(Value::Set(members)) => Ok(members.insert(member.into())),
            Some(other) => Err(other.mismatch(key, "set")),
            None => {
                map.insert(key.to_string(), Value::Set(Members::from([member.into()])));
                Ok(true)
            }
        }
    }

    // == Cardinality ==
    /// Number of members in the set at `key`, 0 if absent.
    pub fn scard(&self, key: &str) -> Result<usize> {
        match self.lock().map.get(key) {
            Some(Value::Set(members)) => Ok(members.len()),
            Some(other) => Err(other.mismatch(key, "set")),
            None => Ok(0),
        }
    }

    // == Remove ==
    /// Removes `member`, returning whether it was present. An absent key
    /// reports false.
    pub fn srem(&self, key: &str, member: impl Into<Value>) -> Result<bool> {
        let member: Value = member.into();
        match self.lock().map.get_mut(key) {
            Some(Value::Set(members)) => Ok(members.swap_remove(&member)),
            Some(other) => Err(other.mismatch(key, "set")),
            None => Ok(false),
        }
    }

    // == Membership ==
    pub fn sismember(&self, key: &str, member: impl Into<Value>) -> Result<bool> {
        let member: Value = member.into();
        match self.lock().map.get(key) {
            Some(Value::Set(members)) => Ok(members.contains(&member)),
            Some(other) => Err(other.mismatch(key, "set")),
            None => Ok(false),
        }
    }

    // == Members ==
    /// All members of the set at `key` in no particular order; empty if absent.
    pub fn smembers(&self, key: &str) -> Result<Vec<Value>> {
        match self.lock().map.get(key) {
            Some(Value::Set(members)) => Ok(members.iter().cloned().collect()),
            Some(other) => Err(other.mismatch(key, "set")),
            None => Ok(Vec::new()),
        }
    }

    // == Algebra ==
    /// Intersection of the sets at `keys`.
    ///
    /// No keys, or any absent key, gives an empty result.
    pub fn sinter<K: AsRef<str>>(&self, keys: &[K]) -> Result<Vec<Value>> {
        self.combine(keys, intersection)
    }

    /// Union of the sets at `keys`; absent keys count as empty sets.
    pub fn sunion<K: AsRef<str>>(&self, keys: &[K]) -> Result<Vec<Value>> {
        self.combine(keys, union)
    }

    /// Members of `keys[0]` not present in any of the remaining sets.
    pub fn sdiff<K: AsRef<str>>(&self, keys: &[K]) -> Result<Vec<Value>> {
        self.combine(keys, difference)
    }

    /// Stores the intersection of `keys[1..]` at `keys[0]`, returning its size.
    ///
    /// The destination is overwritten whatever it held before. Nothing is
    /// written when a source holds a non-set. An empty `keys` is a no-op.
    pub fn sinterstore<K: AsRef<str>>(&self, keys: &[K]) -> Result<usize> {
        self.combine_into(keys, intersection)
    }

    /// Stores the union of `keys[1..]` at `keys[0]`, returning its size.
    pub fn sunionstore<K: AsRef<str>>(&self, keys: &[K]) -> Result<usize> {
        self.combine_into(keys, union)
    }

    /// Stores the difference `keys[1] - keys[2..]` at `keys[0]`, returning its size.
    pub fn sdiffstore<K: AsRef<str>>(&self, keys: &[K]) -> Result<usize> {
        self.combine_into(keys, difference)
    }

    fn combine<K: AsRef<str>>(&self, keys: &[K], op: SetAlgebra) -> Result<Vec<Value>> {
        let mut inner = self.lock();
        let sets = lookup_sets(&mut inner.map, keys)?;
        Ok(op(&sets).into_iter().collect())
    }

    fn combine_into<K: AsRef<str>>(&self, keys: &[K], op: SetAlgebra) -> Result<usize> {
        let Some((destination, sources)) = keys.split_first() else {
            return Ok(0);
        };

        let mut inner = self.lock();
        let result = op(&lookup_sets(&mut inner.map, sources)?);
        let len = result.len();
        inner
            .map
            .insert(destination.as_ref().to_string(), Value::Set(result));
        Ok(len)
    }

    // == Move ==
    /// Moves `member` from the set at `source` to the set at `destination`.
    ///
    /// Returns false without mutating anything when `source` is absent or
    /// lacks `member`. Fails with `WrongType` when `source`, or an existing
    /// `destination`, holds a non-set. A missing destination set is created.
    /// Both sides change under one lock acquisition.
    pub fn smove(
        &self,
        source: &str,
        destination: &str,
        member: impl Into<Value>,
    ) -> Result<bool> {
        let member: Value = member.into();
        let mut inner = self.lock();
        let map = &mut inner.map;

        match map.peek(source) {
            Some(Value::Set(_)) => {}
            Some(other) => return Err(other.mismatch(source, "set")),
            None => return Ok(false),
        }
        if let Some(other) = map.peek(destination) {
            if !matches!(other, Value::Set(_)) {
                return Err(other.mismatch(destination, "set"));
            }
        }

        let removed = match map.get_mut(source) {
            Some(Value::Set(members)) => members.swap_remove(&member),
            _ => false,
        };
        if !removed {
            return Ok(false);
        }

        match map.get_mut(destination) {
            Some(Value::Set(members)) => {
                members.insert(member);
            }
            _ => {
                map.insert(destination.to_string(), Value::Set(Members::from([member])));
            }
        }
        Ok(true)
    }

    // == Random Members ==
    /// Removes and returns a uniformly chosen member.
    ///
    /// None if the key is absent, holds a non-set, or the set is empty.
    pub fn spop(&self, key: &str) -> Option<Value> {
        let mut inner = self.lock();
        let Inner { map, rng, .. } = &mut *inner;

        match map.get_mut(key) {
            Some(Value::Set(members)) if !members.is_empty() => {
                let index = rng.random_range(0..members.len());
                members.swap_remove_index(index)
            }
            _ => None,
        }
    }

    /// Returns a uniformly chosen member without removing it.
    pub fn srandmember(&self, key: &str) -> Option<Value> {
        let mut inner = self.lock();
        let Inner { map, rng, .. } = &mut *inner;

        match map.get(key) {
            Some(Value::Set(members)) if !members.is_empty() => {
                let index = rng.random_range(0..members.len());
                members.get_index(index).cloned()
            }
            _ => None,
        }
    }
}
