//! Application services - Use case implementations

mod weather_service;

pub use weather_service::{
    CurrentReport, ForecastReport, ForecastSource, ProviderStatus, Readiness, WeatherService,
};
