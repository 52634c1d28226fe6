//! UTC offset of a city's local time

use chrono::{DateTime, FixedOffset, NaiveTime, Utc};
use serde::Serialize;

use crate::errors::DomainError;

/// Offset from UTC in seconds, as reported by weather providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct UtcOffset(i32);

impl UtcOffset {
    const MAX_SECONDS: i32 = 18 * 3600;

    /// Create an offset, rejecting values beyond ±18 hours
    pub fn from_seconds(seconds: i32) -> Result<Self, DomainError> {
        if !(-Self::MAX_SECONDS..=Self::MAX_SECONDS).contains(&seconds) {
            return Err(DomainError::InvalidUtcOffset(seconds));
        }
        Ok(Self(seconds))
    }

    /// UTC itself
    #[must_use]
    pub const fn utc() -> Self {
        Self(0)
    }

    /// Offset in seconds east of UTC
    #[must_use]
    pub const fn seconds(&self) -> i32 {
        self.0
    }

    /// Wall-clock time at this offset for the given instant
    #[must_use]
    pub fn local_time(&self, now: DateTime<Utc>) -> NaiveTime {
        FixedOffset::east_opt(self.0).map_or_else(
            || now.time(),
            |offset| now.with_timezone(&offset).time(),
        )
    }
}
