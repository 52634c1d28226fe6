//! Route definitions

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::{handlers, middleware::RequestIdLayer, state::AppState};

/// Create the main router with all routes
///
/// Weather paths are served with and without the trailing slash.
pub fn create_router(state: AppState) -> Router {
    let current = get(handlers::weather::current_weather);
    let forecast =
        get(handlers::weather::forecast).post(handlers::weather::set_forecast);

    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Weather API
        .route("/api/weather/current", current.clone())
        .route("/api/weather/current/", current)
        .route("/api/weather/forecast", forecast.clone())
        .route("/api/weather/forecast/", forecast)
        .with_state(state)
}

/// Create the router wrapped in the HTTP middleware stack
///
/// Outermost first: request id, tracing, CORS, body size limit.
pub fn create_app(state: AppState) -> Router {
    let server = state.config.server.clone();

    create_router(state)
        .layer(RequestBodyLimitLayer::new(server.max_body_size_bytes))
        .layer(cors_layer(&server))
        .layer(TraceLayer::new_for_http())
        .layer(RequestIdLayer::new())
}

/// CORS policy from the configured origins
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    if server.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            },
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}
