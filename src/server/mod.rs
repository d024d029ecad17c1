//! Server Module
//!
//! HTTP surface of the store. Each request runs exactly one store operation.
//!
//! # Endpoints
//! - `POST /command` - Run one store operation
//! - `GET /stats` - Get store statistics
//! - `GET /health` - Health check endpoint

pub mod dispatch;
pub mod handlers;
pub mod routes;

pub use dispatch::execute;
pub use handlers::*;
pub use routes::create_router;
