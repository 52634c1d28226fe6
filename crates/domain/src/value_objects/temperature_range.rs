//! Daily temperature range value object

use serde::Serialize;
use std::fmt;

use crate::errors::DomainError;

/// Minimum and maximum temperature for a day, in Celsius
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureRange {
    min: f64,
    max: f64,
}

impl TemperatureRange {
    /// Create a range, rejecting non-finite values and `min > max`
    pub fn new(min: f64, max: f64) -> Result<Self, DomainError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(DomainError::InvalidTemperatureRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Minimum temperature in Celsius
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Maximum temperature in Celsius
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }
}

impl fmt::Display for TemperatureRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C .. {:.1}°C", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordered_values() {
        let range = TemperatureRange::new(-3.5, 7.25).unwrap();
        assert!((range.min() + 3.5).abs() < f64::EPSILON);
        assert!((range.max() - 7.25).abs() < f64::EPSILON);
    }

    #[test]
    fn accepts_equal_values() {
        assert!(TemperatureRange::new(4.0, 4.0).is_ok());
    }

    #[test]
    fn rejects_min_above_max() {
        let err = TemperatureRange::new(10.0, 2.0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTemperatureRange { .. }));
    }

    #[test]
    fn rejects_nan_and_infinity() {
        assert!(TemperatureRange::new(f64::NAN, 1.0).is_err());
        assert!(TemperatureRange::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn display_has_one_decimal() {
        let range = TemperatureRange::new(1.0, 12.34).unwrap();
        assert_eq!(range.to_string(), "1.0°C .. 12.3°C");
    }
}
