//! Skycast HTTP presentation layer
//!
//! This crate provides the HTTP API for Skycast.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{RequestIdLayer, ValidatedJson, ValidatedQuery, ValidationError};
pub use routes::{create_app, create_router};
pub use state::AppState;
