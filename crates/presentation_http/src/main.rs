//! Skycast HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::WeatherService;
use infrastructure::{
    AppConfig, SecurityValidator, SqliteForecastOverrideStore, build_weather_providers,
    create_pool, init_logging,
};
use presentation_http::{AppState, create_app, error::set_expose_internal_errors};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    init_logging(&config.logging)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "Skycast starting"
    );

    let warnings = SecurityValidator::validate(&config);
    SecurityValidator::log_warnings(&warnings);
    if SecurityValidator::should_block_startup(&config, &warnings) {
        anyhow::bail!(
            "refusing to start with critical security findings (set {} to override)",
            infrastructure::validation::security::ALLOW_INSECURE_VAR
        );
    }

    set_expose_internal_errors(config.security.expose_internal_errors);

    let pool = create_pool(&config.database)?;
    info!(path = %config.database.path, "Database ready");
    let store = Arc::new(SqliteForecastOverrideStore::new(Arc::new(pool)));

    let providers = build_weather_providers(&config.weather)?;
    let weather_service = WeatherService::new(providers, store)?;

    let bind_address = config.server.bind_address();
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    let app = create_app(AppState::new(weather_service, config));

    let listener = TcpListener::bind(&bind_address).await?;
    info!(address = %bind_address, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }

    // Bound the drain so a stuck connection cannot hold the process open
    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        warn!(?timeout, "Connections did not drain in time, exiting");
        std::process::exit(1);
    });
}
