//! Forecast date value object

use chrono::{Days, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::errors::DomainError;

/// Wire format accepted from clients (`31.12.2025`)
pub const DATE_INPUT_FORMAT: &str = "%d.%m.%Y";

/// How far into the future a forecast may be requested
pub const MAX_DAYS_AHEAD: u64 = 10;

/// A calendar date inside the forecast window `[today, today + MAX_DAYS_AHEAD]`
///
/// The window is evaluated against the `today` passed in by the caller, so
/// the same input can be valid one day and rejected the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ForecastDate(NaiveDate);

impl ForecastDate {
    /// Parse a `DD.MM.YYYY` string and check it against the forecast window
    pub fn parse(input: &str, today: NaiveDate) -> Result<Self, DomainError> {
        let date = NaiveDate::parse_from_str(input.trim(), DATE_INPUT_FORMAT).map_err(|_| {
            DomainError::InvalidDate(format!("expected DD.MM.YYYY, got '{}'", input.trim()))
        })?;
        Self::new(date, today)
    }

    /// Check an already parsed date against the forecast window
    pub fn new(date: NaiveDate, today: NaiveDate) -> Result<Self, DomainError> {
        if date < today {
            return Err(DomainError::InvalidDate(
                "date cannot be in the past".to_string(),
            ));
        }

        let last = Self::last_allowed(today);
        if date > last {
            return Err(DomainError::InvalidDate(format!(
                "date cannot be more than {MAX_DAYS_AHEAD} days ahead"
            )));
        }

        Ok(Self(date))
    }

    /// Last date a forecast can be requested for, given `today`
    #[must_use]
    pub fn last_allowed(today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(MAX_DAYS_AHEAD))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Get the underlying date
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for ForecastDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for ForecastDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<ForecastDate> for NaiveDate {
    fn from(date: ForecastDate) -> Self {
        date.0
    }
}
