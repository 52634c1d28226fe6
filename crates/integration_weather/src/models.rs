//! Weather data models
//!
//! Provider-neutral results plus the raw API response shapes of the
//! supported providers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Current conditions reported by a provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Offset of the city's local time from UTC, in seconds
    pub utc_offset_seconds: i32,
}

/// Forecast min/max temperature for a single day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTemperatures {
    /// Forecast day
    pub date: NaiveDate,
    /// Minimum temperature in Celsius
    pub min: f64,
    /// Maximum temperature in Celsius
    pub max: f64,
}

// Open-Meteo

/// Geocoding search response
#[derive(Debug, Deserialize)]
pub(crate) struct GeocodingResponse {
    #[serde(default)]
    pub results: Option<Vec<GeocodingResult>>,
}

/// A single geocoding match
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeocodingResult {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Forecast endpoint response with `current_weather=true`
#[derive(Debug, Deserialize)]
pub(crate) struct OpenMeteoCurrentResponse {
    #[serde(default)]
    pub utc_offset_seconds: i32,
    pub current_weather: Option<OpenMeteoCurrentWeather>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenMeteoCurrentWeather {
    pub temperature: f64,
}

/// Forecast endpoint response with daily min/max temperatures
#[derive(Debug, Deserialize)]
pub(crate) struct OpenMeteoDailyResponse {
    pub daily: Option<OpenMeteoDaily>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenMeteoDaily {
    pub time: Vec<String>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub temperature_2m_max: Vec<Option<f64>>,
}

// OpenWeatherMap

/// `/weather` response
#[derive(Debug, Deserialize)]
pub(crate) struct OwmCurrentResponse {
    pub main: OwmMain,
    #[serde(default)]
    pub timezone: i32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmMain {
    pub temp: f64,
}

/// `/forecast` response (3-hourly steps)
#[derive(Debug, Deserialize)]
pub(crate) struct OwmForecastResponse {
    #[serde(default)]
    pub list: Vec<OwmForecastEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmForecastEntry {
    pub dt_txt: String,
    pub main: OwmForecastMain,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmForecastMain {
    pub temp_min: f64,
    pub temp_max: f64,
}
