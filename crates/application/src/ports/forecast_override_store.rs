//! Forecast override store port
//!
//! Persistence for manually supplied forecasts.

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::{
    entities::ForecastOverride,
    value_objects::{City, TemperatureRange},
};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of an upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No override existed for the key; a new one was stored
    Created,
    /// An existing override was replaced
    Updated,
}

impl UpsertOutcome {
    /// Whether a new record was created
    #[must_use]
    pub const fn created(self) -> bool {
        matches!(self, Self::Created)
    }
}

/// Port for forecast override persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastOverrideStore: Send + Sync {
    /// Find the override for a city on a date
    async fn find(
        &self,
        city: &City,
        date: NaiveDate,
    ) -> Result<Option<ForecastOverride>, ApplicationError>;

    /// Create or replace the override for a city on a date
    async fn upsert(
        &self,
        city: &City,
        date: NaiveDate,
        range: TemperatureRange,
    ) -> Result<UpsertOutcome, ApplicationError>;

    /// Check if the backing store is reachable
    async fn is_healthy(&self) -> bool;
}
