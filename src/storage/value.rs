//! Value Module
//!
//! Defines the closed set of value types a key can hold.

use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

// == Value ==
/// A stored value: a scalar, an ordered list, or a set of unique elements.
///
/// Sets keep insertion order internally so that a seeded random source picks
/// the same members on every run. Equality between two sets ignores order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Str(String),
    List(VecDeque<Value>),
    Set(IndexSet<Value>),
}

impl Value {
    // == Coercion ==
    /// Applies the scalar write coercion rule.
    ///
    /// A `Str` that parses fully as a base-10 `i64` (optional sign, optional
    /// leading zeros, nothing else) becomes an `Integer`. Every other value is
    /// returned unchanged.
    pub fn coerce(self) -> Self {
        match self {
            Value::Str(text) => match text.parse::<i64>() {
                Ok(n) => Value::Integer(n),
                Err(_) => Value::Str(text),
            },
            other => other,
        }
    }

    // == Kind ==
    /// Short lowercase name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Set(_) => "set",
        }
    }

    /// `WrongType` error for an operation that wanted an `expected` value at `key`
    /// but found this value.
    pub fn mismatch(&self, key: &str, expected: &str) -> StoreError {
        StoreError::WrongType(format!(
            "'{}' holds type {}, expected {}",
            key,
            self.kind(),
            expected
        ))
    }

    /// The empty-string marker `lindex` returns for an out-of-range index.
    pub fn empty_str() -> Self {
        Value::Str(String::new())
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Integer(n) => n.hash(state),
            Value::Str(s) => s.hash(state),
            Value::List(items) => {
                items.len().hash(state);
                for item in items {
                    item.hash(state);
                }
            }
            Value::Set(members) => {
                // Must not depend on member order, since equal sets may differ in it.
                let digest = members
                    .iter()
                    .map(|member| {
                        let mut hasher = DefaultHasher::new();
                        member.hash(&mut hasher);
                        hasher.finish()
                    })
                    .fold(0u64, u64::wrapping_add);
                members.len().hash(state);
                digest.hash(state);
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}
