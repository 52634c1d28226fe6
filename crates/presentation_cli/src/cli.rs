//! Command-line definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Server the HTTP commands talk to unless `--url` is given
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Skycast CLI
#[derive(Debug, Parser)]
#[command(name = "skycast-cli")]
#[command(author, version, about = "Skycast weather API CLI", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply pending database migrations
    ///
    /// Uses the database path from configuration unless `--database` is given.
    Migrate {
        /// Path to the SQLite database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Load configuration and report security findings
    ///
    /// Exits with status 1 if any finding is critical.
    CheckConfig,

    /// Show the current temperature and local time for a city
    Current {
        /// City name
        city: String,

        /// Server URL
        #[arg(short, long, env = "SKYCAST_URL", default_value = DEFAULT_SERVER_URL)]
        url: String,
    },

    /// Show the forecast for a city on a date
    Forecast {
        /// City name
        city: String,

        /// Date as DD.MM.YYYY
        date: String,

        /// Server URL
        #[arg(short, long, env = "SKYCAST_URL", default_value = DEFAULT_SERVER_URL)]
        url: String,
    },

    /// Store a forecast override for a city and date
    SetForecast {
        /// City name
        city: String,

        /// Date as DD.MM.YYYY
        date: String,

        /// Minimum temperature in Celsius
        #[arg(allow_negative_numbers = true)]
        min: f64,

        /// Maximum temperature in Celsius
        #[arg(allow_negative_numbers = true)]
        max: f64,

        /// Server URL
        #[arg(short, long, env = "SKYCAST_URL", default_value = DEFAULT_SERVER_URL)]
        url: String,
    },

    /// Check server readiness (usable as a container healthcheck)
    Health {
        /// Server URL
        #[arg(short, long, env = "SKYCAST_URL", default_value = DEFAULT_SERVER_URL)]
        url: String,
    },
}

/// Determine log filter level from verbosity count
#[must_use]
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
