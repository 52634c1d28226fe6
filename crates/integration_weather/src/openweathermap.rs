//! OpenWeatherMap client
//!
//! HTTP client for the OpenWeatherMap 2.5 API. Requires an API key, which is
//! only ever exposed when building the request query.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    client::WeatherClient,
    error::WeatherError,
    models::{CurrentConditions, DailyTemperatures, OwmCurrentResponse, OwmForecastResponse},
};

/// OpenWeatherMap client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherMapConfig {
    /// API key
    #[serde(skip_serializing)]
    pub api_key: SecretString,

    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 5)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    5
}

impl OpenWeatherMapConfig {
    /// Configuration with the given key and default endpoints
    #[must_use]
    pub fn with_api_key(api_key: SecretString) -> Self {
        Self {
            api_key,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// OpenWeatherMap HTTP client implementation
#[derive(Debug)]
pub struct OpenWeatherMapClient {
    client: Client,
    config: OpenWeatherMapConfig,
}

impl OpenWeatherMapClient {
    /// Provider identifier
    pub const NAME: &'static str = "openweathermap";

    /// Create a new OpenWeatherMap client
    ///
    /// # Errors
    ///
    /// Returns `WeatherError::Unauthorized` for an empty API key, or an error
    /// if the HTTP client cannot be initialized.
    pub fn new(config: OpenWeatherMapConfig) -> Result<Self, WeatherError> {
        if config.api_key.expose_secret().trim().is_empty() {
            return Err(WeatherError::Unauthorized);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// GET `{base_url}/{endpoint}?q=<city>&appid=<key>&units=metric`
    async fn fetch(&self, endpoint: &str, city: &str) -> Result<reqwest::Response, WeatherError> {
        let url = format!("{}/{endpoint}", self.config.base_url);
        debug!(url = %url, "Requesting OpenWeatherMap");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.config.api_key.expose_secret()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        match WeatherError::from_status(response.status(), city) {
            Some(err) => Err(err),
            None => Ok(response),
        }
    }

    /// Aggregate the 3-hourly steps falling on `date` into a min/max pair
    fn aggregate_day(
        body: &OwmForecastResponse,
        date: NaiveDate,
    ) -> Result<DailyTemperatures, WeatherError> {
        let wanted = date.format("%Y-%m-%d").to_string();

        let (min, max) = body
            .list
            .iter()
            .filter(|entry| entry.dt_txt.split(' ').next() == Some(wanted.as_str()))
            .fold(None, |acc: Option<(f64, f64)>, entry| {
                let (lo, hi) = (entry.main.temp_min, entry.main.temp_max);
                Some(acc.map_or((lo, hi), |(min, max)| (min.min(lo), max.max(hi))))
            })
            .ok_or_else(|| WeatherError::NotFound(format!("no forecast for {wanted}")))?;

        Ok(DailyTemperatures { date, min, max })
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherMapClient {
    fn provider_name(&self) -> &'static str {
        Self::NAME
    }

    #[instrument(skip(self))]
    async fn current_by_city(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let body: OwmCurrentResponse = self
            .fetch("weather", city)
            .await?
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.without_url().to_string()))?;

        Ok(CurrentConditions {
            temperature: body.main.temp,
            utc_offset_seconds: body.timezone,
        })
    }

    #[instrument(skip(self))]
    async fn daily_by_city(
        &self,
        city: &str,
        date: NaiveDate,
    ) -> Result<DailyTemperatures, WeatherError> {
        let body: OwmForecastResponse = self
            .fetch("forecast", city)
            .await?
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.without_url().to_string()))?;

        Self::aggregate_day(&body, date)
    }

    async fn is_healthy(&self) -> bool {
        self.fetch("weather", "London").await.is_ok()
    }
}
