//! SQLite forecast override store
//!
//! Implements the `ForecastOverrideStore` port.

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{ForecastOverrideStore, UpsertOutcome},
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use domain::{
    entities::ForecastOverride,
    value_objects::{City, TemperatureRange},
};
use rusqlite::{OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::connection::ConnectionPool;

const DATE_COLUMN_FORMAT: &str = "%Y-%m-%d";

/// SQLite-based forecast override store
#[derive(Debug, Clone)]
pub struct SqliteForecastOverrideStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteForecastOverrideStore {
    /// Create a new store over a migrated connection pool
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ForecastOverrideStore for SqliteForecastOverrideStore {
    #[instrument(skip(self), fields(city = %city, date = %date))]
    async fn find(
        &self,
        city: &City,
        date: NaiveDate,
    ) -> Result<Option<ForecastOverride>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let city = city.as_str().to_string();
        let date = date.format(DATE_COLUMN_FORMAT).to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let stored = conn
                .query_row(
                    "SELECT city, date, min_temperature, max_temperature, created_at, updated_at
                     FROM forecast_overrides WHERE city = ?1 AND date = ?2",
                    params![city, date],
                    row_to_override,
                )
                .optional()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            debug!(found = stored.is_some(), "Looked up forecast override");
            Ok(stored)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self), fields(city = %city, date = %date))]
    async fn upsert(
        &self,
        city: &City,
        date: NaiveDate,
        range: TemperatureRange,
    ) -> Result<UpsertOutcome, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let city = city.as_str().to_string();
        let date = date.format(DATE_COLUMN_FORMAT).to_string();
        let now = Utc::now().to_rfc3339();
        let id = Uuid::now_v7().to_string();

        task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;
            let tx = conn
                .transaction()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let existed = tx
                .query_row(
                    "SELECT 1 FROM forecast_overrides WHERE city = ?1 AND date = ?2",
                    params![city, date],
                    |_| Ok(()),
                )
                .optional()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?
                .is_some();

            tx.execute(
                "INSERT INTO forecast_overrides
                 (id, city, date, min_temperature, max_temperature, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
                 ON CONFLICT(city, date) DO UPDATE SET
                     min_temperature = excluded.min_temperature,
                     max_temperature = excluded.max_temperature,
                     updated_at = excluded.updated_at",
                params![id, city, date, range.min(), range.max(), now],
            )
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            tx.commit()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let outcome = if existed {
                UpsertOutcome::Updated
            } else {
                UpsertOutcome::Created
            };
            debug!(?outcome, "Stored forecast override");
            Ok(outcome)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn is_healthy(&self) -> bool {
        let pool = Arc::clone(&self.pool);
        let result = task::spawn_blocking(move || {
            pool.get()
                .ok()
                .and_then(|conn| {
                    conn.query_row("SELECT COUNT(*) FROM forecast_overrides", [], |row| {
                        row.get::<_, i64>(0)
                    })
                    .ok()
                })
                .is_some()
        })
        .await;

        match result {
            Ok(healthy) => {
                if !healthy {
                    warn!("Forecast override store health check failed");
                }
                healthy
            },
            Err(e) => {
                warn!(error = %e, "Forecast override store health check panicked");
                false
            },
        }
    }
}

fn conversion_error(
    column: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(err))
}

fn row_to_override(row: &Row<'_>) -> rusqlite::Result<ForecastOverride> {
    let city_str: String = row.get(0)?;
    let date_str: String = row.get(1)?;
    let min: f64 = row.get(2)?;
    let max: f64 = row.get(3)?;
    let created_at_str: String = row.get(4)?;
    let updated_at_str: String = row.get(5)?;

    let city = City::parse(&city_str).map_err(|e| conversion_error(0, e))?;
    let date = NaiveDate::parse_from_str(&date_str, DATE_COLUMN_FORMAT)
        .map_err(|e| conversion_error(1, e))?;
    let range = TemperatureRange::new(min, max).map_err(|e| conversion_error(2, e))?;

    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));
    let updated_at = DateTime::parse_from_rfc3339(&updated_at_str)
        .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

    Ok(ForecastOverride::restore(
        city, date, range, created_at, updated_at,
    ))
}
