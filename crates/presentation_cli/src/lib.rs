//! Skycast CLI
//!
//! Command definitions and the operations behind them. The binary in
//! `main.rs` only parses arguments and prints results.

pub mod api_client;
pub mod cli;
pub mod migrate;

pub use api_client::{ApiClient, ApiResponse};
pub use cli::{Cli, Commands, DEFAULT_SERVER_URL, log_filter_from_verbosity};
pub use migrate::migrate_database;
