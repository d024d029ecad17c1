//! Error types for the key-value store
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for the store and its server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// `store` was called on a key that already exists
    #[error("Key already exists: {0}")]
    DuplicatedKey(String),

    /// `get` or `remove` was called on a missing key
    #[error("Key not found: {0}")]
    NonExistentKey(String),

    /// Store construction parameters are invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The key holds a value of a different type than the operation expects
    #[error("Wrong type: {0}")]
    WrongType(String),

    /// Malformed command rejected before reaching the store
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            StoreError::DuplicatedKey(_) => StatusCode::CONFLICT,
            StoreError::NonExistentKey(_) => StatusCode::NOT_FOUND,
            StoreError::WrongType(_) | StoreError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            StoreError::InvalidConfiguration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
