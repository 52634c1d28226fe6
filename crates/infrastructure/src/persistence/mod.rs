//! Persistence module
//!
//! SQLite-based storage for forecast overrides.

pub mod connection;
pub mod forecast_override_store;
pub mod migrations;

pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use forecast_override_store::SqliteForecastOverrideStore;
pub use migrations::{MigrationReport, SCHEMA_VERSION, run_migrations};
