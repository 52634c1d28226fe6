//! Weather provider adapter - Implements WeatherProviderPort using integration_weather
//!
//! Availability is remembered for [`AVAILABILITY_TTL`]. Real calls refresh it,
//! so readiness checks only reach the provider when it has been idle.

use std::{
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

use application::{
    error::ApplicationError,
    ports::{CurrentWeather, WeatherProviderPort},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use domain::value_objects::{City, TemperatureRange, UtcOffset};
use integration_weather::{WeatherClient, WeatherError};
use tracing::{debug, instrument};

/// How long a known availability state is trusted
const AVAILABILITY_TTL: Duration = Duration::from_secs(30);

/// Adapts any `WeatherClient` to the application's provider port
#[derive(Debug)]
pub struct WeatherProviderAdapter<C> {
    client: C,
    availability: Mutex<Option<(Instant, bool)>>,
}

impl<C: WeatherClient> WeatherProviderAdapter<C> {
    /// Wrap a weather client
    #[must_use]
    pub const fn new(client: C) -> Self {
        Self {
            client,
            availability: Mutex::new(None),
        }
    }

    fn cached_availability(&self) -> Option<bool> {
        let state = *self
            .availability
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        state
            .filter(|(at, _)| at.elapsed() < AVAILABILITY_TTL)
            .map(|(_, available)| available)
    }

    fn remember_availability(&self, available: bool) {
        *self
            .availability
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some((Instant::now(), available));
    }

    /// Record what a call result says about the provider being reachable
    fn observe<T>(&self, result: &Result<T, WeatherError>) {
        match result {
            Ok(_) | Err(WeatherError::NotFound(_)) => self.remember_availability(true),
            Err(
                WeatherError::ConnectionFailed(_)
                | WeatherError::Timeout
                | WeatherError::ServiceUnavailable(_),
            ) => self.remember_availability(false),
            Err(_) => {},
        }
    }

    /// Map integration weather error to application error
    fn map_error(city: &City, err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::NotFound(detail) => {
                ApplicationError::NotFound(format!("{city}: {detail}"))
            },
            WeatherError::ConnectionFailed(_)
            | WeatherError::Timeout
            | WeatherError::RequestFailed(_)
            | WeatherError::ParseError(_)
            | WeatherError::ServiceUnavailable(_)
            | WeatherError::RateLimitExceeded
            | WeatherError::Unauthorized => ApplicationError::ExternalService(err.to_string()),
        }
    }
}

#[async_trait]
impl<C: WeatherClient> WeatherProviderPort for WeatherProviderAdapter<C> {
    fn name(&self) -> &'static str {
        self.client.provider_name()
    }

    #[instrument(skip(self), fields(provider = self.client.provider_name()))]
    async fn current_weather(&self, city: &City) -> Result<CurrentWeather, ApplicationError> {
        let result = self.client.current_by_city(city.as_str()).await;
        self.observe(&result);
        let conditions = result.map_err(|e| Self::map_error(city, e))?;

        let utc_offset = UtcOffset::from_seconds(conditions.utc_offset_seconds).map_err(|e| {
            ApplicationError::ExternalService(format!("provider returned {e}"))
        })?;

        debug!(temperature = conditions.temperature, "Received current weather");
        Ok(CurrentWeather {
            temperature: conditions.temperature,
            utc_offset,
        })
    }

    #[instrument(skip(self), fields(provider = self.client.provider_name()))]
    async fn daily_temperatures(
        &self,
        city: &City,
        date: NaiveDate,
    ) -> Result<TemperatureRange, ApplicationError> {
        let result = self.client.daily_by_city(city.as_str(), date).await;
        self.observe(&result);
        let daily = result.map_err(|e| Self::map_error(city, e))?;

        TemperatureRange::new(daily.min, daily.max)
            .map_err(|e| ApplicationError::ExternalService(format!("provider returned {e}")))
    }

    async fn is_available(&self) -> bool {
        if let Some(available) = self.cached_availability() {
            return available;
        }
        let available = self.client.is_healthy().await;
        debug!(provider = self.client.provider_name(), available, "Availability checked");
        self.remember_availability(available);
        available
    }
}
