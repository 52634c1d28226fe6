//! Weather service
//!
//! Answers current-weather and forecast queries by consulting an ordered
//! chain of weather providers, with stored forecast overrides taking
//! precedence over provider data.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveTime, Utc};
use domain::value_objects::{City, ForecastDate, TemperatureRange};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{ForecastOverrideStore, UpsertOutcome, WeatherProviderPort},
};

/// Current weather for a city, resolved to its local wall-clock time
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentReport {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Local time in the city
    pub local_time: NaiveTime,
    /// Provider that answered
    pub provider: &'static str,
}

/// Where a forecast came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastSource {
    /// A stored forecast override
    Override,
    /// A weather provider, by name
    Provider(&'static str),
}

impl fmt::Display for ForecastSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override => f.write_str("override"),
            Self::Provider(name) => f.write_str(name),
        }
    }
}

/// Forecast for a city on a date
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReport {
    /// Forecast minimum and maximum temperature
    pub range: TemperatureRange,
    /// Origin of the forecast
    pub source: ForecastSource,
}

/// Availability of a single provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderStatus {
    /// Provider name
    pub name: &'static str,
    /// Whether the provider answered its availability probe
    pub available: bool,
}

/// Readiness of the service's dependencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readiness {
    /// Whether the override store is reachable
    pub store_healthy: bool,
    /// Per-provider availability, in chain order
    pub providers: Vec<ProviderStatus>,
}

impl Readiness {
    /// Ready when the store is healthy and at least one provider answers
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.store_healthy && self.providers.iter().any(|p| p.available)
    }
}

/// Weather query use cases
pub struct WeatherService {
    providers: Vec<Arc<dyn WeatherProviderPort>>,
    overrides: Arc<dyn ForecastOverrideStore>,
}

impl fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherService")
            .field("providers", &self.provider_names())
            .finish_non_exhaustive()
    }
}

impl WeatherService {
    /// Create a service over an ordered provider chain
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` when `providers` is empty.
    pub fn new(
        providers: Vec<Arc<dyn WeatherProviderPort>>,
        overrides: Arc<dyn ForecastOverrideStore>,
    ) -> Result<Self, ApplicationError> {
        if providers.is_empty() {
            return Err(ApplicationError::Configuration(
                "at least one weather provider must be configured".to_string(),
            ));
        }
        Ok(Self {
            providers,
            overrides,
        })
    }

    /// Names of the configured providers, in chain order
    #[must_use]
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Current temperature and local time for a city
    #[instrument(skip_all, fields(city = %city))]
    pub async fn current_weather(
        &self,
        city: &City,
        now: DateTime<Utc>,
    ) -> Result<CurrentReport, ApplicationError> {
        let mut last_error = None;

        for provider in &self.providers {
            match provider.current_weather(city).await {
                Ok(weather) => {
                    debug!(provider = provider.name(), "Current weather resolved");
                    return Ok(CurrentReport {
                        temperature: weather.temperature,
                        local_time: weather.utc_offset.local_time(now),
                        provider: provider.name(),
                    });
                },
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "Provider failed");
                    last_error = Some(e);
                },
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ApplicationError::Configuration("no weather providers configured".to_string())
        }))
    }

    /// Forecast for a city on a date
    ///
    /// A stored override wins over provider data.
    #[instrument(skip_all, fields(city = %city, date = %date))]
    pub async fn forecast(
        &self,
        city: &City,
        date: ForecastDate,
    ) -> Result<ForecastReport, ApplicationError> {
        if let Some(stored) = self.overrides.find(city, date.date()).await? {
            debug!("Serving forecast override");
            return Ok(ForecastReport {
                range: stored.range(),
                source: ForecastSource::Override,
            });
        }

        let mut last_error = None;

        for provider in &self.providers {
            match provider.daily_temperatures(city, date.date()).await {
                Ok(range) => {
                    debug!(provider = provider.name(), "Forecast resolved");
                    return Ok(ForecastReport {
                        range,
                        source: ForecastSource::Provider(provider.name()),
                    });
                },
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "Provider failed");
                    last_error = Some(e);
                },
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ApplicationError::Configuration("no weather providers configured".to_string())
        }))
    }

    /// Create or replace the forecast override for a city on a date
    #[instrument(skip_all, fields(city = %city, date = %date))]
    pub async fn set_forecast_override(
        &self,
        city: &City,
        date: ForecastDate,
        range: TemperatureRange,
    ) -> Result<UpsertOutcome, ApplicationError> {
        let outcome = self.overrides.upsert(city, date.date(), range).await?;
        info!(created = outcome.created(), "Forecast override stored");
        Ok(outcome)
    }

    /// Probe the override store and every provider
    pub async fn readiness(&self) -> Readiness {
        let store_healthy = self.overrides.is_healthy().await;

        let mut providers = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            providers.push(ProviderStatus {
                name: provider.name(),
                available: provider.is_available().await,
            });
        }

        Readiness {
            store_healthy,
            providers,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Days, NaiveDate, TimeZone};
    use domain::{entities::ForecastOverride, value_objects::UtcOffset};

    use super::*;
    use crate::ports::{CurrentWeather, MockForecastOverrideStore, MockWeatherProviderPort};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn city() -> City {
        City::parse("Berlin").unwrap()
    }

    fn tomorrow() -> ForecastDate {
        ForecastDate::new(today().checked_add_days(Days::new(1)).unwrap(), today()).unwrap()
    }

    fn range(min: f64, max: f64) -> TemperatureRange {
        TemperatureRange::new(min, max).unwrap()
    }

    fn empty_store() -> MockForecastOverrideStore {
        let mut store = MockForecastOverrideStore::new();
        store.expect_find().returning(|_, _| Ok(None));
        store
    }

    fn provider(name: &'static str) -> MockWeatherProviderPort {
        let mut mock = MockWeatherProviderPort::new();
        mock.expect_name().return_const(name);
        mock
    }

    fn service(
        providers: Vec<MockWeatherProviderPort>,
        store: MockForecastOverrideStore,
    ) -> WeatherService {
        let providers = providers
            .into_iter()
            .map(|p| Arc::new(p) as Arc<dyn WeatherProviderPort>)
            .collect();
        WeatherService::new(providers, Arc::new(store)).unwrap()
    }

    #[test]
    fn empty_provider_chain_is_rejected() {
        let result = WeatherService::new(Vec::new(), Arc::new(MockForecastOverrideStore::new()));
        assert!(matches!(result, Err(ApplicationError::Configuration(_))));
    }

    #[test]
    fn provider_names_in_order() {
        let svc = service(
            vec![provider("openweathermap"), provider("open_meteo")],
            MockForecastOverrideStore::new(),
        );
        assert_eq!(svc.provider_names(), vec!["openweathermap", "open_meteo"]);
    }

    #[tokio::test]
    async fn current_weather_converts_to_local_time() {
        let mut first = provider("first");
        first.expect_current_weather().times(1).returning(|_| {
            Ok(CurrentWeather {
                temperature: 18.25,
                utc_offset: UtcOffset::from_seconds(7200).unwrap(),
            })
        });

        let svc = service(vec![first], MockForecastOverrideStore::new());
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 22, 30, 0).unwrap();
        let report = svc.current_weather(&city(), now).await.unwrap();

        assert!((report.temperature - 18.25).abs() < f64::EPSILON);
        assert_eq!(report.local_time.format("%H:%M").to_string(), "00:30");
        assert_eq!(report.provider, "first");
    }

    #[tokio::test]
    async fn current_weather_falls_back_to_next_provider() {
        let mut first = provider("first");
        first
            .expect_current_weather()
            .times(1)
            .returning(|_| Err(ApplicationError::ExternalService("down".into())));
        let mut second = provider("second");
        second.expect_current_weather().times(1).returning(|_| {
            Ok(CurrentWeather {
                temperature: 5.0,
                utc_offset: UtcOffset::utc(),
            })
        });

        let svc = service(vec![first, second], MockForecastOverrideStore::new());
        let report = svc.current_weather(&city(), Utc::now()).await.unwrap();
        assert_eq!(report.provider, "second");
    }

    #[tokio::test]
    async fn current_weather_stops_at_first_success() {
        let mut first = provider("first");
        first.expect_current_weather().times(1).returning(|_| {
            Ok(CurrentWeather {
                temperature: 1.0,
                utc_offset: UtcOffset::utc(),
            })
        });
        let mut second = provider("second");
        second.expect_current_weather().never();

        let svc = service(vec![first, second], MockForecastOverrideStore::new());
        assert!(svc.current_weather(&city(), Utc::now()).await.is_ok());
    }

    #[tokio::test]
    async fn all_providers_failing_returns_last_error() {
        let mut first = provider("first");
        first
            .expect_current_weather()
            .times(1)
            .returning(|_| Err(ApplicationError::ExternalService("timeout".into())));
        let mut second = provider("second");
        second
            .expect_current_weather()
            .times(1)
            .returning(|_| Err(ApplicationError::NotFound("Atlantis".into())));

        let svc = service(vec![first, second], MockForecastOverrideStore::new());
        let err = svc.current_weather(&city(), Utc::now()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)));
    }

    #[tokio::test]
    async fn forecast_prefers_override() {
        let mut store = MockForecastOverrideStore::new();
        store.expect_find().times(1).returning(|c, d| {
            Ok(Some(ForecastOverride::restore(
                c.clone(),
                d,
                range(-3.0, 4.5),
                Utc::now(),
                Utc::now(),
            )))
        });
        let mut first = provider("first");
        first.expect_daily_temperatures().never();

        let svc = service(vec![first], store);
        let report = svc.forecast(&city(), tomorrow()).await.unwrap();

        assert_eq!(report.source, ForecastSource::Override);
        assert!((report.range.min() + 3.0).abs() < f64::EPSILON);
        assert!((report.range.max() - 4.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn forecast_uses_provider_without_override() {
        let mut first = provider("first");
        first
            .expect_daily_temperatures()
            .times(1)
            .returning(|_, _| Ok(range(10.0, 20.0)));

        let svc = service(vec![first], empty_store());
        let report = svc.forecast(&city(), tomorrow()).await.unwrap();
        assert_eq!(report.source, ForecastSource::Provider("first"));
    }

    #[tokio::test]
    async fn forecast_passes_requested_date_to_provider() {
        let expected = tomorrow().date();
        let mut first = provider("first");
        first
            .expect_daily_temperatures()
            .withf(move |_, date| *date == expected)
            .times(1)
            .returning(|_, _| Ok(range(0.0, 1.0)));

        let svc = service(vec![first], empty_store());
        assert!(svc.forecast(&city(), tomorrow()).await.is_ok());
    }

    #[tokio::test]
    async fn forecast_returns_last_provider_error() {
        let mut first = provider("first");
        first
            .expect_daily_temperatures()
            .returning(|_, _| Err(ApplicationError::NotFound("city".into())));
        let mut second = provider("second");
        second
            .expect_daily_temperatures()
            .returning(|_, _| Err(ApplicationError::ExternalService("503".into())));

        let svc = service(vec![first, second], empty_store());
        let err = svc.forecast(&city(), tomorrow()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }

    #[tokio::test]
    async fn forecast_store_failure_propagates() {
        let mut store = MockForecastOverrideStore::new();
        store
            .expect_find()
            .returning(|_, _| Err(ApplicationError::Internal("db locked".into())));
        let mut first = provider("first");
        first.expect_daily_temperatures().never();

        let svc = service(vec![first], store);
        let err = svc.forecast(&city(), tomorrow()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Internal(_)));
    }

    #[tokio::test]
    async fn set_override_reports_outcome() {
        let mut store = MockForecastOverrideStore::new();
        store
            .expect_upsert()
            .times(1)
            .returning(|_, _, _| Ok(UpsertOutcome::Created));

        let svc = service(vec![provider("first")], store);
        let outcome = svc
            .set_forecast_override(&city(), tomorrow(), range(1.0, 2.0))
            .await
            .unwrap();
        assert!(outcome.created());
    }

    #[tokio::test]
    async fn readiness_requires_store_and_one_provider() {
        let mut store = MockForecastOverrideStore::new();
        store.expect_is_healthy().returning(|| true);
        let mut first = provider("first");
        first.expect_is_available().returning(|| false);
        let mut second = provider("second");
        second.expect_is_available().returning(|| true);

        let svc = service(vec![first, second], store);
        let readiness = svc.readiness().await;

        assert!(readiness.is_ready());
        assert_eq!(readiness.providers.len(), 2);
        assert!(!readiness.providers[0].available);
    }

    #[tokio::test]
    async fn readiness_fails_with_unhealthy_store() {
        let mut store = MockForecastOverrideStore::new();
        store.expect_is_healthy().returning(|| false);
        let mut first = provider("first");
        first.expect_is_available().returning(|| true);

        let svc = service(vec![first], store);
        assert!(!svc.readiness().await.is_ready());
    }

    #[test]
    fn forecast_source_display() {
        assert_eq!(ForecastSource::Override.to_string(), "override");
        assert_eq!(ForecastSource::Provider("open_meteo").to_string(), "open_meteo");
    }
}
