//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod weather_provider_adapter;

use std::sync::Arc;

use application::{error::ApplicationError, ports::WeatherProviderPort};
use integration_weather::{OpenMeteoClient, OpenWeatherMapClient};
use tracing::{info, warn};

pub use weather_provider_adapter::WeatherProviderAdapter;

use crate::config::{ProviderKind, WeatherProvidersConfig};

/// Build the ordered provider chain from configuration
///
/// OpenWeatherMap entries without an API key are skipped with a warning.
///
/// # Errors
///
/// Returns `ApplicationError::Configuration` when no provider remains, or
/// `ApplicationError::Internal` if an HTTP client cannot be created.
pub fn build_weather_providers(
    config: &WeatherProvidersConfig,
) -> Result<Vec<Arc<dyn WeatherProviderPort>>, ApplicationError> {
    if config.providers.contains(&ProviderKind::OpenWeatherMap)
        && !config.openweathermap.has_api_key()
    {
        warn!("OpenWeatherMap configured without API key, skipping it");
    }

    let mut providers: Vec<Arc<dyn WeatherProviderPort>> = Vec::new();
    for kind in config.usable_providers() {
        let provider: Arc<dyn WeatherProviderPort> = match kind {
            ProviderKind::OpenMeteo => {
                let client = OpenMeteoClient::new(config.open_meteo.clone())
                    .map_err(|e| ApplicationError::Internal(e.to_string()))?;
                Arc::new(WeatherProviderAdapter::new(client))
            },
            ProviderKind::OpenWeatherMap => {
                let Some(client_config) = config.openweathermap.to_client_config() else {
                    continue;
                };
                let client = OpenWeatherMapClient::new(client_config)
                    .map_err(|e| ApplicationError::Internal(e.to_string()))?;
                Arc::new(WeatherProviderAdapter::new(client))
            },
        };
        providers.push(provider);
    }

    if providers.is_empty() {
        return Err(ApplicationError::Configuration(
            "no usable weather provider configured (check weather.providers and WEATHER_API_KEY)"
                .to_string(),
        ));
    }

    info!(
        providers = ?providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
        "Weather providers ready"
    );
    Ok(providers)
}
