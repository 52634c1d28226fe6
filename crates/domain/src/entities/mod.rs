//! Domain entities

mod forecast_override;

pub use forecast_override::ForecastOverride;
