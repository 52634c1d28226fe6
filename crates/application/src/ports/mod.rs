//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod forecast_override_store;
mod weather_port;

#[cfg(test)]
pub use forecast_override_store::MockForecastOverrideStore;
pub use forecast_override_store::{ForecastOverrideStore, UpsertOutcome};
#[cfg(test)]
pub use weather_port::MockWeatherProviderPort;
pub use weather_port::{CurrentWeather, WeatherProviderPort};
