//! Weather provider port
//!
//! Defines the interface every upstream weather provider is adapted to.

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::value_objects::{City, TemperatureRange, UtcOffset};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Current conditions for a city as reported by a provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentWeather {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Offset of the city's local time from UTC
    pub utc_offset: UtcOffset,
}

/// Port for weather provider operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherProviderPort: Send + Sync {
    /// Short provider identifier used in logs and readiness output
    fn name(&self) -> &'static str;

    /// Get current weather for a city
    ///
    /// Returns `ApplicationError::NotFound` for unknown cities.
    async fn current_weather(&self, city: &City) -> Result<CurrentWeather, ApplicationError>;

    /// Get the min/max temperature forecast for a city on a date
    ///
    /// Returns `ApplicationError::NotFound` when the city is unknown or the
    /// provider has no data for that date.
    async fn daily_temperatures(
        &self,
        city: &City,
        date: NaiveDate,
    ) -> Result<TemperatureRange, ApplicationError>;

    /// Check if the provider is reachable
    async fn is_available(&self) -> bool;
}
