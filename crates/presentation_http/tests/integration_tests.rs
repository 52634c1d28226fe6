//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use application::{
    WeatherService,
    error::ApplicationError,
    ports::{CurrentWeather, ForecastOverrideStore, UpsertOutcome, WeatherProviderPort},
};
use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Days, NaiveDate, Utc};
use domain::{
    entities::ForecastOverride,
    value_objects::{City, TemperatureRange, UtcOffset},
};
use infrastructure::AppConfig;
use presentation_http::{AppState, create_app, middleware::REQUEST_ID_HEADER};
use serde_json::{Value, json};
use tokio::sync::RwLock;

/// How a stub provider answers
#[derive(Debug, Clone, Copy)]
enum Behavior {
    Answer,
    UnknownCity,
    Down,
}

/// Provider stub with canned answers and call counting
struct StubProvider {
    name: &'static str,
    behavior: Behavior,
    temperature: f64,
    range: (f64, f64),
    calls: AtomicUsize,
}

impl StubProvider {
    fn new(name: &'static str, behavior: Behavior) -> Self {
        Self {
            name,
            behavior,
            temperature: 21.5,
            range: (12.0, 24.0),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn outcome<T>(&self, city: &City, value: T) -> Result<T, ApplicationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Answer => Ok(value),
            Behavior::UnknownCity => Err(ApplicationError::NotFound(city.to_string())),
            Behavior::Down => Err(ApplicationError::ExternalService(format!(
                "{} unreachable",
                self.name
            ))),
        }
    }
}

#[async_trait]
impl WeatherProviderPort for StubProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn current_weather(&self, city: &City) -> Result<CurrentWeather, ApplicationError> {
        self.outcome(
            city,
            CurrentWeather {
                temperature: self.temperature,
                utc_offset: UtcOffset::from_seconds(3600).expect("valid offset"),
            },
        )
    }

    async fn daily_temperatures(
        &self,
        city: &City,
        _date: NaiveDate,
    ) -> Result<TemperatureRange, ApplicationError> {
        let range = TemperatureRange::new(self.range.0, self.range.1).expect("valid range");
        self.outcome(city, range)
    }

    async fn is_available(&self) -> bool {
        matches!(self.behavior, Behavior::Answer | Behavior::UnknownCity)
    }
}

/// In-memory override store
struct MemoryStore {
    overrides: RwLock<HashMap<(String, NaiveDate), TemperatureRange>>,
    healthy: bool,
}

impl MemoryStore {
    fn new() -> Self {
        Self {
            overrides: RwLock::new(HashMap::new()),
            healthy: true,
        }
    }

    fn unhealthy() -> Self {
        Self {
            healthy: false,
            ..Self::new()
        }
    }
}

#[async_trait]
impl ForecastOverrideStore for MemoryStore {
    async fn find(
        &self,
        city: &City,
        date: NaiveDate,
    ) -> Result<Option<ForecastOverride>, ApplicationError> {
        let overrides = self.overrides.read().await;
        Ok(overrides
            .get(&(city.as_str().to_string(), date))
            .map(|range| {
                let now = Utc::now();
                ForecastOverride::restore(city.clone(), date, *range, now, now)
            }))
    }

    async fn upsert(
        &self,
        city: &City,
        date: NaiveDate,
        range: TemperatureRange,
    ) -> Result<UpsertOutcome, ApplicationError> {
        let mut overrides = self.overrides.write().await;
        let previous = overrides.insert((city.as_str().to_string(), date), range);
        Ok(if previous.is_some() {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Created
        })
    }

    async fn is_healthy(&self) -> bool {
        self.healthy
    }
}

fn create_server(providers: Vec<Arc<StubProvider>>, store: MemoryStore) -> TestServer {
    let providers: Vec<Arc<dyn WeatherProviderPort>> = providers
        .into_iter()
        .map(|p| p as Arc<dyn WeatherProviderPort>)
        .collect();
    let service = WeatherService::new(providers, Arc::new(store)).expect("provider chain");
    let app = create_app(AppState::new(service, AppConfig::default()));
    TestServer::new(app).expect("Failed to create test server")
}

fn single_provider(behavior: Behavior) -> (TestServer, Arc<StubProvider>) {
    let provider = Arc::new(StubProvider::new("stub", behavior));
    let server = create_server(vec![Arc::clone(&provider)], MemoryStore::new());
    (server, provider)
}

fn days_from_today(days: u64) -> String {
    Utc::now()
        .date_naive()
        .checked_add_days(Days::new(days))
        .expect("date in range")
        .format("%d.%m.%Y")
        .to_string()
}

// ============ Health Endpoint Tests ============

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let (server, _) = single_provider(Behavior::Answer);

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn readiness_ok_when_store_and_provider_healthy() {
    let (server, _) = single_provider(Behavior::Answer);

    let response = server.get("/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ready"], true);
    assert_eq!(body["store"]["healthy"], true);
    assert_eq!(body["providers"][0]["name"], "stub");
}

#[tokio::test]
async fn readiness_unavailable_when_store_unhealthy() {
    let provider = Arc::new(StubProvider::new("stub", Behavior::Answer));
    let server = create_server(vec![provider], MemoryStore::unhealthy());

    let response = server.get("/ready").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["ready"], false);
}

#[tokio::test]
async fn readiness_unavailable_when_all_providers_down() {
    let (server, _) = single_provider(Behavior::Down);

    let response = server.get("/ready").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

// ============ Current Weather Tests ============

#[tokio::test]
async fn current_weather_returns_temperature_and_local_time() {
    let (server, _) = single_provider(Behavior::Answer);

    let response = server
        .get("/api/weather/current/")
        .add_query_param("city", "Paris")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["temperature"], 21.5);
    let local_time = body["local_time"].as_str().expect("local_time string");
    assert_eq!(local_time.len(), 5);
    assert_eq!(&local_time[2..3], ":");
}

#[tokio::test]
async fn current_weather_without_trailing_slash() {
    let (server, _) = single_provider(Behavior::Answer);

    let response = server
        .get("/api/weather/current")
        .add_query_param("city", "Paris")
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn current_weather_requires_city() {
    let (server, provider) = single_provider(Behavior::Answer);

    let response = server.get("/api/weather/current/").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "validation_error");
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn current_weather_rejects_long_city() {
    let (server, provider) = single_provider(Behavior::Answer);

    let response = server
        .get("/api/weather/current/")
        .add_query_param("city", "x".repeat(21))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "bad_request");
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn current_weather_trims_city_before_length_check() {
    let (server, provider) = single_provider(Behavior::Answer);

    let response = server
        .get("/api/weather/current/")
        .add_query_param("city", format!("   {}   ", "a".repeat(18)))
        .await;

    response.assert_status_ok();
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn set_forecast_trims_city_before_length_check() {
    let (server, _) = single_provider(Behavior::Answer);

    let response = server
        .post("/api/weather/forecast/")
        .json(&json!({
            "city": format!("  {}  ", "b".repeat(20)),
            "date": days_from_today(2),
            "min_temperature": 1.0,
            "max_temperature": 2.0
        }))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn current_weather_rejects_blank_city() {
    let (server, _) = single_provider(Behavior::Answer);

    let response = server
        .get("/api/weather/current/")
        .add_query_param("city", "   ")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn current_weather_unknown_city_is_not_found() {
    let (server, _) = single_provider(Behavior::UnknownCity);

    let response = server
        .get("/api/weather/current/")
        .add_query_param("city", "Atlantis")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "City not found");
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn current_weather_provider_down_is_service_unavailable() {
    let (server, _) = single_provider(Behavior::Down);

    let response = server
        .get("/api/weather/current/")
        .add_query_param("city", "Paris")
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["error"], "Weather service connection error");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn current_weather_falls_back_to_next_provider() {
    let primary = Arc::new(StubProvider::new("primary", Behavior::Down));
    let secondary = Arc::new(StubProvider::new("secondary", Behavior::Answer));
    let server = create_server(
        vec![Arc::clone(&primary), Arc::clone(&secondary)],
        MemoryStore::new(),
    );

    let response = server
        .get("/api/weather/current/")
        .add_query_param("city", "Paris")
        .await;

    response.assert_status_ok();
    assert_eq!(primary.calls(), 1);
    assert_eq!(secondary.calls(), 1);
}

// ============ Forecast Tests ============

#[tokio::test]
async fn forecast_returns_provider_range() {
    let (server, _) = single_provider(Behavior::Answer);

    let response = server
        .get("/api/weather/forecast/")
        .add_query_param("city", "Paris")
        .add_query_param("date", days_from_today(1))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({"min_temperature": 12.0, "max_temperature": 24.0}));
}

#[tokio::test]
async fn forecast_accepts_last_day_of_window() {
    let (server, _) = single_provider(Behavior::Answer);

    let response = server
        .get("/api/weather/forecast")
        .add_query_param("city", "Paris")
        .add_query_param("date", days_from_today(10))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn forecast_rejects_date_beyond_window() {
    let (server, provider) = single_provider(Behavior::Answer);

    let response = server
        .get("/api/weather/forecast/")
        .add_query_param("city", "Paris")
        .add_query_param("date", days_from_today(11))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn forecast_rejects_past_date() {
    let (server, _) = single_provider(Behavior::Answer);

    let response = server
        .get("/api/weather/forecast/")
        .add_query_param("city", "Paris")
        .add_query_param("date", "01.01.2000")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn forecast_rejects_iso_date() {
    let (server, _) = single_provider(Behavior::Answer);

    let response = server
        .get("/api/weather/forecast/")
        .add_query_param("city", "Paris")
        .add_query_param("date", "2030-01-01")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn forecast_unknown_city_is_not_found() {
    let (server, _) = single_provider(Behavior::UnknownCity);

    let response = server
        .get("/api/weather/forecast/")
        .add_query_param("city", "Atlantis")
        .add_query_param("date", days_from_today(0))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

// ============ Forecast Override Tests ============

#[tokio::test]
async fn override_is_served_without_calling_providers() {
    let (server, provider) = single_provider(Behavior::Down);
    let date = days_from_today(2);

    let response = server
        .post("/api/weather/forecast/")
        .json(&json!({
            "city": "Oslo",
            "date": date,
            "min_temperature": -4.0,
            "max_temperature": 1.5
        }))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({"message": "OK", "created": true}));

    let response = server
        .get("/api/weather/forecast/")
        .add_query_param("city", "Oslo")
        .add_query_param("date", &date)
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({"min_temperature": -4.0, "max_temperature": 1.5}));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn second_override_reports_update() {
    let (server, _) = single_provider(Behavior::Answer);
    let body = json!({
        "city": "Oslo",
        "date": days_from_today(3),
        "min_temperature": 0.0,
        "max_temperature": 5.0
    });

    server
        .post("/api/weather/forecast")
        .json(&body)
        .await
        .assert_json(&json!({"message": "OK", "created": true}));

    server
        .post("/api/weather/forecast")
        .json(&body)
        .await
        .assert_json(&json!({"message": "OK", "created": false}));
}

#[tokio::test]
async fn override_rejects_inverted_range() {
    let (server, _) = single_provider(Behavior::Answer);

    let response = server
        .post("/api/weather/forecast/")
        .json(&json!({
            "city": "Oslo",
            "date": days_from_today(1),
            "min_temperature": 10.0,
            "max_temperature": 2.0
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn override_accepts_equal_min_and_max() {
    let (server, _) = single_provider(Behavior::Answer);

    let response = server
        .post("/api/weather/forecast/")
        .json(&json!({
            "city": "Oslo",
            "date": days_from_today(1),
            "min_temperature": 3.0,
            "max_temperature": 3.0
        }))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn override_rejects_missing_fields() {
    let (server, _) = single_provider(Behavior::Answer);

    let response = server
        .post("/api/weather/forecast/")
        .json(&json!({"city": "Oslo"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn override_rejects_past_date() {
    let (server, _) = single_provider(Behavior::Answer);

    let response = server
        .post("/api/weather/forecast/")
        .json(&json!({
            "city": "Oslo",
            "date": "31.12.1999",
            "min_temperature": 0.0,
            "max_temperature": 1.0
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

// ============ Middleware Tests ============

#[tokio::test]
async fn responses_carry_request_id() {
    let (server, _) = single_provider(Behavior::Answer);

    let response = server.get("/health").await;

    let header = response.header(REQUEST_ID_HEADER);
    assert!(!header.is_empty());
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (server, _) = single_provider(Behavior::Answer);

    let response = server.get("/api/weather/history/").await;

    response.assert_status(StatusCode::NOT_FOUND);
}
