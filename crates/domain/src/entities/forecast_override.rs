//! Forecast override entity
//!
//! A manually supplied min/max forecast for one city on one date. When an
//! override exists it is served instead of asking a weather provider.

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{City, TemperatureRange};

/// Manually set forecast for a `(city, date)` pair
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastOverride {
    city: City,
    date: NaiveDate,
    range: TemperatureRange,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ForecastOverride {
    /// Restore an override from storage
    ///
    /// Stored dates are not re-checked against the forecast window: a row
    /// written yesterday for "today" is still a valid record.
    #[must_use]
    pub const fn restore(
        city: City,
        date: NaiveDate,
        range: TemperatureRange,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            city,
            date,
            range,
            created_at,
            updated_at,
        }
    }

    /// City the override applies to
    #[must_use]
    pub const fn city(&self) -> &City {
        &self.city
    }

    /// Date the override applies to
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Overridden temperature range
    #[must_use]
    pub const fn range(&self) -> TemperatureRange {
        self.range
    }

    /// When the override was first stored
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the override was last replaced
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

}
