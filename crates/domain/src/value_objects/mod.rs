//! Value Objects - Immutable, identity-less domain primitives

mod city;
mod forecast_date;
mod temperature_range;
mod utc_offset;

pub use city::City;
pub use forecast_date::{DATE_INPUT_FORMAT, ForecastDate, MAX_DAYS_AHEAD};
pub use temperature_range::TemperatureRange;
pub use utc_offset::UtcOffset;
