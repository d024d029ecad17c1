//! List Operations
//!
//! Ordered sequences stored as `Value::List`. A list is created on the first
//! push to an absent key. Values pushed into a list are never coerced.

use std::collections::VecDeque;

use crate::error::Result;
use crate::storage::{Storage, Value};

/// Resolves an inclusive `[start, end]` range against a list of `len` items.
///
/// `end` is clamped to the last index. Returns None when the range selects
/// nothing: negative `start`, `start` past the end, or `start > end`.
fn clamp_range(len: usize, start: i64, end: i64) -> Option<(usize, usize)> {
    let last = len as i64 - 1;
    if start < 0 || start > last || start > end {
        return None;
    }
    Some((start as usize, end.min(last) as usize))
}

/// Converts an index into a position inside `[0, len)`.
fn checked_index(len: usize, index: i64) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}

impl Storage {
    // == Push ==
    /// Pushes `value` at the head of the list at `key`.
    ///
    /// Returns false without mutating anything if the key holds a non-list.
    pub fn lpush(&self, key: &str, value: impl Into<Value>) -> bool {
        self.push(key, value.into(), true)
    }

    /// Pushes `value` at the tail of the list at `key`.
    pub fn rpush(&self, key: &str, value: impl Into<Value>) -> bool {
        self.push(key, value.into(), false)
    }

    fn push(&self, key: &str, value: Value, front: bool) -> bool {
        let mut inner = self.lock();
        let map = &mut inner.map;

        match map.get_mut(key) {
            Some(Value::List(items)) => {
                if front {
                    items.push_front(value);
                } else {
                    items.push_back(value);
                }
                true
            }
            Some(_) => false,
            None => {
                map.insert(key.to_string(), Value::List(VecDeque::from([value])));
                true
            }
        }
    }

    // == Pop ==
    /// Removes and returns the first element.
    ///
    /// None if the key is absent, holds a non-list, or the list is empty.
    pub fn lpop(&self, key: &str) -> Option<Value> {
        match self.lock().map.get_mut(key) {
            Some(Value::List(items)) => items.pop_front(),
            _ => None,
        }
    }

    /// Removes and returns the last element.
    pub fn rpop(&self, key: &str) -> Option<Value> {
        match self.lock().map.get_mut(key) {
            Some(Value::List(items)) => items.pop_back(),
            _ => None,
        }
    }

    // == Index ==
    /// Returns the element at `index`.
    ///
    /// None if the key is absent or holds a non-list. An index outside
    /// `[0, len)` yields `Some(Value::Str(""))`, which callers must keep
    /// distinct from None.
    pub fn lindex(&self, key: &str, index: i64) -> Option<Value> {
        match self.lock().map.get(key) {
            Some(Value::List(items)) => Some(
                checked_index(items.len(), index)
                    .map(|i| items[i].clone())
                    .unwrap_or_else(Value::empty_str),
            ),
            _ => None,
        }
    }

    // == Length ==
    /// Length of the list at `key`, 0 if absent.
    pub fn llen(&self, key: &str) -> Result<usize> {
        match self.lock().map.get(key) {
            Some(Value::List(items)) => Ok(items.len()),
            Some(other) => Err(other.mismatch(key, "list")),
            None => Ok(0),
        }
    }

    // == Set ==
    /// Overwrites the element at `index` in place.
    ///
    /// Returns false if the key is absent, holds a non-list, or `index` is
    /// outside `[0, len)`.
    pub fn lset(&self, key: &str, index: i64, value: impl Into<Value>) -> bool {
        match self.lock().map.get_mut(key) {
            Some(Value::List(items)) => match checked_index(items.len(), index) {
                Some(i) => {
                    items[i] = value.into();
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    // == Range ==
    /// Returns the inclusive slice `[start, end]`, with `end` clamped.
    ///
    /// An absent key or an out-of-range request yields an empty vector; a
    /// non-list value is a `WrongType` error.
    pub fn lrange(&self, key: &str, start: i64, end: i64) -> Result<Vec<Value>> {
        match self.lock().map.get(key) {
            Some(Value::List(items)) => Ok(clamp_range(items.len(), start, end)
                .map(|(s, e)| items.range(s..=e).cloned().collect())
                .unwrap_or_default()),
            Some(other) => Err(other.mismatch(key, "list")),
            None => Ok(Vec::new()),
        }
    }

    // == Trim ==
    /// Keeps only the `lrange(key, start, end)` slice of the stored list.
    ///
    /// An out-of-range request leaves an empty list behind. Returns false
    /// only when the key is absent or holds a non-list.
    pub fn ltrim(&self, key: &str, start: i64, end: i64) -> bool {
        match self.lock().map.get_mut(key) {
            Some(Value::List(items)) => {
                match clamp_range(items.len(), start, end) {
                    Some((s, e)) => {
                        items.truncate(e + 1);
                        items.drain(..s);
                    }
                    None => items.clear(),
                }
                true
            }
            _ => false,
        }
    }

    // == Remove Occurrences ==
    /// Removes elements equal to `value` and returns how many were removed.
    ///
    /// `count == 0` removes all of them, `count > 0` at most `count` scanning
    /// from the head, `count < 0` at most `|count|` scanning from the tail.
    /// Absent keys and non-list values remove nothing.
    pub fn lrem(&self, key: &str, count: i64, value: impl Into<Value>) -> usize {
        let mut inner = self.lock();
        let items = match inner.map.get_mut(key) {
            Some(Value::List(items)) => items,
            _ => return 0,
        };

        let target = value.into();
        let limit = if count == 0 {
            usize::MAX
        } else {
            usize::try_from(count.unsigned_abs()).unwrap_or(usize::MAX)
        };
        let mut removed = 0;

        if count >= 0 {
            items.retain(|item| {
                if removed < limit && *item == target {
                    removed += 1;
                    false
                } else {
                    true
                }
            });
        } else {
            let mut kept = VecDeque::with_capacity(items.len());
            while let Some(item) = items.pop_back() {
                if removed < limit && item == target {
                    removed += 1;
                } else {
                    kept.push_front(item);
                }
            }
            *items = kept;
        }

        removed
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn strs(values: &[&str]) -> Vec<Value> {
        values.iter().map(|v| Value::from(*v)).collect()
    }

    fn list_of(store: &Storage, key: &str) -> Vec<Value> {
        store.lrange(key, 0, i64::MAX).unwrap()
    }

    #[test]
    fn test_push_pop_order() {
        let store = Storage::new(10).unwrap();

        assert!(store.rpush("L", "a"));
        assert!(store.rpush("L", "b"));
        assert_eq!(store.lrange("L", 0, 1).unwrap(), strs(&["a", "b"]));

        assert_eq!(store.lpop("L"), Some(Value::from("a")));
        assert_eq!(store.lpop("L"), Some(Value::from("b")));
        assert_eq!(store.lpop("L"), None);
    }

    #[test]
    fn test_lpush_prepends() {
        let store = Storage::new(10).unwrap();

        store.lpush("L", "a");
        store.lpush("L", "b");
        store.rpush("L", "c");

        assert_eq!(list_of(&store, "L"), strs(&["b", "a", "c"]));
        assert_eq!(store.rpop("L"), Some(Value::from("c")));
    }

    #[test]
    fn test_push_does_not_coerce() {
        let store = Storage::new(10).unwrap();

        store.rpush("L", "12");
        assert_eq!(store.lindex("L", 0), Some(Value::from("12")));
    }

    #[test]
    fn test_push_on_wrong_type() {
        let store = Storage::new(10).unwrap();
        store.store("s", "scalar").unwrap();

        assert!(!store.lpush("s", "x"));
        assert!(!store.rpush("s", "x"));
        assert_eq!(store.get("s").unwrap(), Value::from("scalar"));
    }

    #[test]
    fn test_pop_sentinels() {
        let store = Storage::new(10).unwrap();
        store.store("s", "scalar").unwrap();

        assert_eq!(store.lpop("missing"), None);
        assert_eq!(store.rpop("s"), None);
    }

    #[test]
    fn test_empty_list_survives_pops() {
        let store = Storage::new(10).unwrap();

        store.rpush("L", "a");
        store.rpop("L");

        assert!(store.contains_key("L"));
        assert_eq!(store.llen("L"), Ok(0));
    }

    #[test]
    fn test_lindex() {
        let store = Storage::new(10).unwrap();
        store.store("s", "scalar").unwrap();
        store.rpush("L", "a");
        store.rpush("L", "b");

        assert_eq!(store.lindex("L", 1), Some(Value::from("b")));
        assert_eq!(store.lindex("L", 2), Some(Value::empty_str()));
        assert_eq!(store.lindex("L", -1), Some(Value::empty_str()));
        assert_eq!(store.lindex("missing", 0), None);
        assert_eq!(store.lindex("s", 0), None);
    }

    #[test]
    fn test_llen() {
        let store = Storage::new(10).unwrap();
        store.store("s", "scalar").unwrap();
        store.rpush("L", "a");
        store.rpush("L", "b");

        assert_eq!(store.llen("L"), Ok(2));
        assert_eq!(store.llen("missing"), Ok(0));
        assert_eq!(
            store.llen("s"),
            Err(StoreError::WrongType(
                "'s' holds type string, expected list".to_string()
            ))
        );
    }

    #[test]
    fn test_lset() {
        let store = Storage::new(10).unwrap();
        store.store("s", "scalar").unwrap();
        store.rpush("L", "a");
        store.rpush("L", "b");

        assert!(store.lset("L", 1, "z"));
        assert_eq!(list_of(&store, "L"), strs(&["a", "z"]));

        assert!(!store.lset("L", 2, "x"));
        assert!(!store.lset("L", -1, "x"));
        assert!(!store.lset("missing", 0, "x"));
        assert!(!store.lset("s", 0, "x"));
    }

    #[test]
    fn test_lrange_clamping() {
        let store = Storage::new(10).unwrap();
        for v in ["a", "b", "c"] {
            store.rpush("L", v);
        }

        assert_eq!(store.lrange("L", 1, 100).unwrap(), strs(&["b", "c"]));
        assert_eq!(store.lrange("L", 0, 0).unwrap(), strs(&["a"]));
        assert!(store.lrange("L", 3, 5).unwrap().is_empty());
        assert!(store.lrange("L", 2, 1).unwrap().is_empty());
        assert!(store.lrange("L", -1, 2).unwrap().is_empty());
        assert!(store.lrange("missing", 0, 10).unwrap().is_empty());
    }

    #[test]
    fn test_lrange_wrong_type() {
        let store = Storage::new(10).unwrap();
        store.sadd("S", "x").unwrap();

        assert!(matches!(store.lrange("S", 0, 1), Err(StoreError::WrongType(_))));
    }

    #[test]
    fn test_ltrim() {
        let store = Storage::new(10).unwrap();
        for v in ["a", "b", "c", "d"] {
            store.rpush("L", v);
        }

        assert!(store.ltrim("L", 1, 2));
        assert_eq!(list_of(&store, "L"), strs(&["b", "c"]));

        assert!(store.ltrim("L", 1, 50));
        assert_eq!(list_of(&store, "L"), strs(&["c"]));
    }

    #[test]
    fn test_ltrim_out_of_range_empties_list() {
        let store = Storage::new(10).unwrap();
        for v in ["a", "b", "c"] {
            store.rpush("L", v);
        }

        assert!(store.ltrim("L", 5, 10));
        assert_eq!(store.llen("L"), Ok(0));
        assert!(store.contains_key("L"));
    }

    #[test]
    fn test_ltrim_sentinels() {
        let store = Storage::new(10).unwrap();
        store.store("s", "scalar").unwrap();

        assert!(!store.ltrim("missing", 0, 1));
        assert!(!store.ltrim("s", 0, 1));
    }

    #[test]
    fn test_lrem_all() {
        let store = Storage::new(10).unwrap();
        for v in ["x", "a", "x", "b", "x"] {
            store.rpush("L", v);
        }

        assert_eq!(store.lrem("L", 0, "x"), 3);
        assert_eq!(list_of(&store, "L"), strs(&["a", "b"]));
    }

    #[test]
    fn test_lrem_from_head() {
        let store = Storage::new(10).unwrap();
        for v in ["x", "a", "x", "b", "x"] {
            store.rpush("L", v);
        }

        assert_eq!(store.lrem("L", 2, "x"), 2);
        assert_eq!(list_of(&store, "L"), strs(&["a", "b", "x"]));
    }

    #[test]
    fn test_lrem_from_tail() {
        let store = Storage::new(10).unwrap();
        for v in ["x", "a", "x", "b", "x"] {
            store.rpush("L", v);
        }

        assert_eq!(store.lrem("L", -2, "x"), 2);
        assert_eq!(list_of(&store, "L"), strs(&["x", "a", "b"]));
    }

    #[test]
    fn test_lrem_uses_value_equality() {
        let store = Storage::new(10).unwrap();
        store.rpush("L", "1");
        store.rpush("L", 1i64);

        assert_eq!(store.lrem("L", 0, 1i64), 1);
        assert_eq!(list_of(&store, "L"), strs(&["1"]));
    }

    #[test]
    fn test_lrem_sentinels() {
        let store = Storage::new(10).unwrap();
        store.store("s", "x").unwrap();

        assert_eq!(store.lrem("missing", 0, "x"), 0);
        assert_eq!(store.lrem("s", 0, "x"), 0);
    }

    #[test]
    fn test_clamp_range() {
        assert_eq!(clamp_range(3, 0, 10), Some((0, 2)));
        assert_eq!(clamp_range(3, 2, 2), Some((2, 2)));
        assert_eq!(clamp_range(0, 0, 0), None);
        assert_eq!(clamp_range(3, 3, 3), None);
        assert_eq!(clamp_range(3, -1, 1), None);
        assert_eq!(clamp_range(3, 2, 1), None);
    }
}
