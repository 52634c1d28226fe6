//! Open-Meteo weather client
//!
//! HTTP client for the Open-Meteo geocoding and forecast APIs. No API key
//! is required.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::value_objects::MAX_DAYS_AHEAD;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    client::WeatherClient,
    error::WeatherError,
    models::{
        CurrentConditions, DailyTemperatures, GeocodingResponse, GeocodingResult,
        OpenMeteoCurrentResponse, OpenMeteoDailyResponse,
    },
};

/// Upper bound Open-Meteo accepts for `forecast_days`
const MAX_FORECAST_DAYS: u8 = 16;

/// Open-Meteo client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenMeteoConfig {
    /// Forecast API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Geocoding API base URL (default: <https://geocoding-api.open-meteo.com/v1>)
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Request timeout in seconds (default: 5)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Number of forecast days requested (1-16, default: 11)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    5
}

#[allow(clippy::cast_possible_truncation)]
const fn default_forecast_days() -> u8 {
    // Today plus every allowed day ahead.
    (MAX_DAYS_AHEAD + 1) as u8
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            geocoding_url: default_geocoding_url(),
            timeout_secs: default_timeout(),
            forecast_days: default_forecast_days(),
        }
    }
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: OpenMeteoConfig,
}

impl OpenMeteoClient {
    /// Provider identifier
    pub const NAME: &'static str = "open_meteo";

    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: OpenMeteoConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(OpenMeteoConfig::default())
    }

    /// Effective `forecast_days` query value
    fn forecast_days(&self) -> u8 {
        self.config.forecast_days.clamp(1, MAX_FORECAST_DAYS)
    }

    /// Resolve a city name to coordinates and timezone
    #[instrument(skip(self))]
    async fn geocode(&self, city: &str) -> Result<GeocodingResult, WeatherError> {
        let url = format!("{}/search", self.config.geocoding_url);
        debug!(url = %url, "Geocoding city");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?;

        if let Some(err) = WeatherError::from_status(response.status(), city) {
            return Err(err);
        }

        let body: GeocodingResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        body.results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| WeatherError::NotFound(city.to_string()))
    }

    fn timezone(location: &GeocodingResult) -> &str {
        location.timezone.as_deref().unwrap_or("auto")
    }

    /// Pick the entry for `date` out of a daily series
    fn select_day(
        body: OpenMeteoDailyResponse,
        date: NaiveDate,
    ) -> Result<DailyTemperatures, WeatherError> {
        let daily = body
            .daily
            .ok_or_else(|| WeatherError::ParseError("No daily data in response".to_string()))?;

        let wanted = date.format("%Y-%m-%d").to_string();
        let index = daily
            .time
            .iter()
            .position(|day| *day == wanted)
            .ok_or_else(|| WeatherError::NotFound(format!("no forecast for {wanted}")))?;

        let min = daily.temperature_2m_min.get(index).copied().flatten();
        let max = daily.temperature_2m_max.get(index).copied().flatten();

        match (min, max) {
            (Some(min), Some(max)) => Ok(DailyTemperatures { date, min, max }),
            _ => Err(WeatherError::NotFound(format!("no forecast for {wanted}"))),
        }
    }
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    fn provider_name(&self) -> &'static str {
        Self::NAME
    }

    #[instrument(skip(self))]
    async fn current_by_city(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let location = self.geocode(city).await?;

        let url = format!("{}/forecast", self.config.base_url);
        debug!(url = %url, "Fetching current weather");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("timezone", Self::timezone(&location).to_string()),
            ])
            .send()
            .await?;

        if let Some(err) = WeatherError::from_status(response.status(), city) {
            return Err(err);
        }

        let body: OpenMeteoCurrentResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        let current = body.current_weather.ok_or_else(|| {
            WeatherError::ParseError("No current weather data in response".to_string())
        })?;

        Ok(CurrentConditions {
            temperature: current.temperature,
            utc_offset_seconds: body.utc_offset_seconds,
        })
    }

    #[instrument(skip(self))]
    async fn daily_by_city(
        &self,
        city: &str,
        date: NaiveDate,
    ) -> Result<DailyTemperatures, WeatherError> {
        let location = self.geocode(city).await?;

        let url = format!("{}/forecast", self.config.base_url);
        debug!(url = %url, "Fetching daily forecast");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("daily", "temperature_2m_min,temperature_2m_max".to_string()),
                ("forecast_days", self.forecast_days().to_string()),
                ("timezone", Self::timezone(&location).to_string()),
            ])
            .send()
            .await?;

        if let Some(err) = WeatherError::from_status(response.status(), city) {
            return Err(err);
        }

        let body: OpenMeteoDailyResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        Self::select_day(body, date)
    }

    async fn is_healthy(&self) -> bool {
        self.geocode("Berlin").await.is_ok()
    }
}
