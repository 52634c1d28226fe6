//! Logging setup
//!
//! Installs a global `tracing` subscriber with an `EnvFilter` and either
//! human-readable or JSON output.

use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, registry::Registry, util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingConfig};

/// Error returned when a global subscriber is already installed
pub use tracing_subscriber::util::TryInitError;

/// Build the filter, preferring `RUST_LOG` over the configured directives
#[must_use]
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber
///
/// Fails if a subscriber has already been set, e.g. when called twice.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = build_filter(config);
    let registry = Registry::default().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    }
}
