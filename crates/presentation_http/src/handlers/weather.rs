//! Weather handlers
//!
//! `GET /api/weather/current/`, `GET /api/weather/forecast/` and
//! `POST /api/weather/forecast/`.

use axum::{Json, extract::State};
use chrono::Utc;
use domain::value_objects::{City, ForecastDate, TemperatureRange};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use validator::Validate;

use crate::{
    error::ApiError,
    middleware::{ValidatedJson, ValidatedQuery},
    state::AppState,
};

/// Format of `local_time` in current weather responses
const LOCAL_TIME_FORMAT: &str = "%H:%M";

/// Query parameters for the current weather endpoint
#[derive(Debug, Deserialize, Validate)]
pub struct CurrentWeatherQuery {
    /// Trimmed and length-checked by `City::parse`
    #[validate(length(min = 1, message = "is required"))]
    pub city: String,
}

/// Current weather response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeatherResponse {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Local time in the city, `HH:MM`
    pub local_time: String,
}

/// Query parameters for the forecast endpoint
#[derive(Debug, Deserialize, Validate)]
pub struct ForecastQuery {
    /// Trimmed and length-checked by `City::parse`
    #[validate(length(min = 1, message = "is required"))]
    pub city: String,
    /// `DD.MM.YYYY`
    #[validate(length(min = 1, message = "is required"))]
    pub date: String,
}

/// Forecast response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub min_temperature: f64,
    pub max_temperature: f64,
}

/// Body of a forecast override request
#[derive(Debug, Deserialize, Validate)]
pub struct SetForecastRequest {
    /// Trimmed and length-checked by `City::parse`
    #[validate(length(min = 1, message = "is required"))]
    pub city: String,
    /// `DD.MM.YYYY`
    #[validate(length(min = 1, message = "is required"))]
    pub date: String,
    pub min_temperature: f64,
    pub max_temperature: f64,
}

/// Forecast override response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetForecastResponse {
    pub message: String,
    /// `true` if a new override was stored, `false` if one was replaced
    pub created: bool,
}

/// Current temperature and local time for a city
#[instrument(skip(state, query), fields(city = %query.city))]
pub async fn current_weather(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<CurrentWeatherQuery>,
) -> Result<Json<CurrentWeatherResponse>, ApiError> {
    let city = City::parse(&query.city)?;

    let report = state
        .weather_service
        .current_weather(&city, Utc::now())
        .await?;
    debug!(provider = report.provider, "Current weather served");

    Ok(Json(CurrentWeatherResponse {
        temperature: report.temperature,
        local_time: report.local_time.format(LOCAL_TIME_FORMAT).to_string(),
    }))
}

/// Forecast temperatures for a city on a date
#[instrument(skip(state, query), fields(city = %query.city, date = %query.date))]
pub async fn forecast(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ForecastQuery>,
) -> Result<Json<ForecastResponse>, ApiError> {
    let city = City::parse(&query.city)?;
    let date = ForecastDate::parse(&query.date, Utc::now().date_naive())?;

    let report = state.weather_service.forecast(&city, date).await?;
    debug!(source = %report.source, "Forecast served");

    Ok(Json(ForecastResponse {
        min_temperature: report.range.min(),
        max_temperature: report.range.max(),
    }))
}

/// Create or replace the forecast override for a city and date
#[instrument(skip(state, request), fields(city = %request.city, date = %request.date))]
pub async fn set_forecast(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SetForecastRequest>,
) -> Result<Json<SetForecastResponse>, ApiError> {
    let city = City::parse(&request.city)?;
    let date = ForecastDate::parse(&request.date, Utc::now().date_naive())?;
    let range = TemperatureRange::new(request.min_temperature, request.max_temperature)?;

    let outcome = state
        .weather_service
        .set_forecast_override(&city, date, range)
        .await?;

    Ok(Json(SetForecastResponse {
        message: "OK".to_string(),
        created: outcome.created(),
    }))
}
