//! Typed KV - A bounded in-memory key-value store
//!
//! Provides Redis-like scalars, lists and sets with a fixed entry capacity
//! and LRU-biased eviction, plus a small HTTP server in front of it.

pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod storage;

pub use config::Config;
pub use error::{Result, StoreError};
pub use server::AppState;
pub use storage::{Storage, Value};
