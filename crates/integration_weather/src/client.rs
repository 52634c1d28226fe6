//! Provider-neutral weather client interface

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    error::WeatherError,
    models::{CurrentConditions, DailyTemperatures},
};

/// Weather client trait for fetching weather data by city name
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Short identifier of the upstream provider
    fn provider_name(&self) -> &'static str;

    /// Get current conditions for a city
    async fn current_by_city(&self, city: &str) -> Result<CurrentConditions, WeatherError>;

    /// Get min/max temperatures for a city on a date
    async fn daily_by_city(
        &self,
        city: &str,
        date: NaiveDate,
    ) -> Result<DailyTemperatures, WeatherError>;

    /// Check if the weather service is reachable
    async fn is_healthy(&self) -> bool;
}
