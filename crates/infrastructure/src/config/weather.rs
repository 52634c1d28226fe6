//! Weather provider configuration: chain order and per-provider settings.

use std::fmt;

use integration_weather::{
    OpenMeteoClient, OpenMeteoConfig, OpenWeatherMapClient, OpenWeatherMapConfig,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Supported upstream providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Open-Meteo (no API key)
    OpenMeteo,
    /// OpenWeatherMap (API key required)
    #[serde(rename = "openweathermap")]
    OpenWeatherMap,
}

impl ProviderKind {
    /// Identifier used in configuration and logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenMeteo => OpenMeteoClient::NAME,
            Self::OpenWeatherMap => OpenWeatherMapClient::NAME,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OpenWeatherMap settings as they appear in configuration
///
/// The API key is optional here; without one the provider is skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherMapAppConfig {
    /// API key (usually supplied via `WEATHER_API_KEY`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// API base URL
    #[serde(default = "default_owm_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_owm_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    5
}

impl Default for OpenWeatherMapAppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_owm_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl OpenWeatherMapAppConfig {
    /// Whether a non-blank API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    /// Client configuration, or `None` without an API key
    #[must_use]
    pub fn to_client_config(&self) -> Option<OpenWeatherMapConfig> {
        if !self.has_api_key() {
            return None;
        }
        self.api_key.as_ref().map(|key| OpenWeatherMapConfig {
            api_key: key.clone(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        })
    }
}

/// Weather provider chain configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherProvidersConfig {
    /// Providers in the order they are consulted
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderKind>,

    /// Open-Meteo settings
    #[serde(default)]
    pub open_meteo: OpenMeteoConfig,

    /// OpenWeatherMap settings
    #[serde(default)]
    pub openweathermap: OpenWeatherMapAppConfig,
}

fn default_providers() -> Vec<ProviderKind> {
    vec![ProviderKind::OpenWeatherMap, ProviderKind::OpenMeteo]
}

impl Default for WeatherProvidersConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            open_meteo: OpenMeteoConfig::default(),
            openweathermap: OpenWeatherMapAppConfig::default(),
        }
    }
}

impl WeatherProvidersConfig {
    /// Providers that can actually be built, in order, without duplicates
    ///
    /// OpenWeatherMap is dropped when no API key is configured.
    #[must_use]
    pub fn usable_providers(&self) -> Vec<ProviderKind> {
        let mut usable = Vec::with_capacity(self.providers.len());
        for kind in &self.providers {
            if usable.contains(kind) {
                continue;
            }
            if *kind == ProviderKind::OpenWeatherMap && !self.openweathermap.has_api_key() {
                continue;
            }
            usable.push(*kind);
        }
        usable
    }
}
