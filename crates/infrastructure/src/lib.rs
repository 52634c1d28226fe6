//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the weather provider adapters, SQLite persistence,
//! configuration loading, logging setup and startup validation.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;
pub mod validation;

pub use adapters::{WeatherProviderAdapter, build_weather_providers};
pub use config::{
    AppConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig, SecurityConfig,
    ServerConfig, WeatherProvidersConfig,
};
pub use persistence::{ConnectionPool, SqliteForecastOverrideStore, create_pool};
pub use telemetry::init_logging;
pub use validation::{SecurityValidator, SecurityWarning, WarningSeverity};
