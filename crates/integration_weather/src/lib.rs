//! Weather provider integrations
//!
//! Clients for the Open-Meteo API (<https://open-meteo.com>, no API key) and
//! the OpenWeatherMap API (<https://openweathermap.org>, API key required).
//! Both resolve weather by city name.

pub mod client;
mod error;
mod models;
pub mod open_meteo;
pub mod openweathermap;

pub use client::WeatherClient;
pub use error::WeatherError;
pub use models::{CurrentConditions, DailyTemperatures};
pub use open_meteo::{OpenMeteoClient, OpenMeteoConfig};
pub use openweathermap::{OpenWeatherMapClient, OpenWeatherMapConfig};
