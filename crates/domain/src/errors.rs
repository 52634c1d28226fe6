//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// City name is empty or too long
    #[error("Invalid city: {0}")]
    InvalidCity(String),

    /// Forecast date could not be parsed or lies outside the forecast window
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Minimum temperature exceeds the maximum, or a value is not finite
    #[error("Invalid temperature range: min {min} / max {max}")]
    InvalidTemperatureRange { min: f64, max: f64 },

    /// UTC offset outside of ±18 hours
    #[error("Invalid UTC offset: {0} seconds")]
    InvalidUtcOffset(i32),
}
