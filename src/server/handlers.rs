//! API Handlers
//!
//! HTTP request handlers for each server endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::error::{Result, StoreError};
use crate::models::{Command, HealthResponse, Reply, StatsResponse};
use crate::server::dispatch::execute;
use crate::storage::Storage;

/// Application state shared across all handlers.
///
/// The store does its own locking, so handlers only share an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
}

impl AppState {
    /// Creates a new AppState around the given store.
    pub fn new(storage: Storage) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails with `InvalidConfiguration` when the configured capacity is zero.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        let storage = match config.rng_seed {
            Some(seed) => Storage::with_seed(config.max_entries, seed)?,
            None => Storage::new(config.max_entries)?,
        };
        Ok(Self::new(storage))
    }
}

/// Handler for POST /command
///
/// Validates the command and runs it against the store.
pub async fn command_handler(
    State(state): State<AppState>,
    Json(command): Json<Command>,
) -> Result<Json<Reply>> {
    if let Some(error_msg) = command.validate() {
        return Err(StoreError::InvalidRequest(error_msg));
    }

    // Store operations are short and never block on I/O.
    let reply = execute(&state.storage, command)?;
    Ok(Json(reply))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.storage.stats();
    Json(StatsResponse::new(&stats, state.storage.capacity()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::storage::Value;

    fn test_state() -> AppState {
        AppState::new(Storage::new(100).unwrap())
    }

    #[tokio::test]
    async fn test_store_and_get_via_handler() {
        let state = test_state();

        let cmd = Command::Store {
            key: "test_key".to_string(),
            value: Value::from("test_value"),
        };
        let result = command_handler(State(state.clone()), Json(cmd)).await;
        assert_eq!(result.unwrap().0, Reply::Ok);

        let cmd = Command::Get {
            key: "test_key".to_string(),
        };
        let result = command_handler(State(state), Json(cmd)).await;
        assert_eq!(result.unwrap().0, Reply::Value(Value::from("test_value")));
    }

    #[tokio::test]
    async fn test_invalid_command_rejected() {
        let state = test_state();

        let cmd = Command::SInterStore { keys: Vec::new() };
        let result = command_handler(State(state), Json(cmd)).await;
        assert!(matches!(result, Err(StoreError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.capacity, 100);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_from_config_rejects_zero_capacity() {
        let config = Config {
            max_entries: 0,
            ..Config::default()
        };
        assert!(matches!(
            AppState::from_config(&config),
            Err(StoreError::InvalidConfiguration(_))
        ));
    }
}
