//! Storage Module
//!
//! Bounded in-memory store of typed values: scalars, lists and sets, with
//! LRU-biased eviction once the entry capacity is reached.

mod bounded;
mod list;
mod lru;
mod set;
mod stats;
mod store;
mod value;


// Re-export public types
pub use bounded::BoundedMap;
pub use lru::LruTracker;
pub use stats::StoreStats;
pub use store::Storage;
pub use value::Value;
