//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: SQLite database settings
//! - `weather`: Provider chain and per-provider settings
//! - `security`: Secret key and error exposure
//! - `logging`: Log filter and output format
//!
//! Sources, lowest precedence first: built-in defaults, `config.toml`,
//! `SKYCAST__*` environment variables, then the plain `WEATHER_API_KEY` and
//! `SECRET_KEY` variables. A `.env` file in the working directory is loaded
//! into the process environment before any of them are read.

mod database;
mod logging;
mod security;
mod server;
mod weather;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use database::DatabaseConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use security::SecurityConfig;
pub use server::ServerConfig;
pub use weather::{OpenWeatherMapAppConfig, ProviderKind, WeatherProvidersConfig};

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Prefix for structured environment overrides (`SKYCAST__SERVER__PORT`)
pub const ENV_PREFIX: &str = "SKYCAST";

/// Separator between prefix and nested keys
pub const ENV_SEPARATOR: &str = "__";

/// Optional configuration file, resolved against the working directory
const CONFIG_FILE: &str = "config";

/// Plain variable carrying the OpenWeatherMap API key
pub const WEATHER_API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Plain variable carrying the application secret key
pub const SECRET_KEY_VAR: &str = "SECRET_KEY";

/// Application environment (development or production)
///
/// Controls security validation strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - relaxed security warnings
    #[default]
    Development,
    /// Production environment - strict security validation
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    ///
    /// In production, critical security warnings prevent startup unless
    /// SKYCAST_ALLOW_INSECURE_CONFIG=true.
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherProvidersConfig,

    /// Security configuration
    #[serde(default)]
    pub security: SecurityConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `.env`, `config.toml` and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => {},
            Err(e) => return Err(config::ConfigError::Foreign(Box::new(e))),
        }

        Self::load_from(CONFIG_FILE, std::env::vars())
    }

    /// Load configuration using `file` (without extension) as the optional
    /// configuration file and `vars` as the environment
    ///
    /// When a variable appears more than once the last value wins.
    pub fn load_from(
        file: &str,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, config::ConfigError> {
        let vars: config::Map<String, String> = vars.into_iter().collect();
        let api_key = vars.get(WEATHER_API_KEY_VAR).cloned();
        let secret_key = vars.get(SECRET_KEY_VAR).cloned();

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", server::DEFAULT_HOST)?
            .set_default("server.port", i64::from(server::DEFAULT_PORT))?
            .set_default("database.path", database::DEFAULT_PATH)?
            // Load from file if exists
            .add_source(config::File::with_name(file).required(false))
            // Override with environment variables (e.g., SKYCAST__SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("weather.providers")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true)
                    .source(Some(vars)),
            )
            .set_override_option("weather.openweathermap.api_key", api_key)?
            .set_override_option("security.secret_key", secret_key)?;

        builder.build()?.try_deserialize()
    }

    /// Whether the application runs in production mode
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}
