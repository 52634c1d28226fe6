//! Database migrations
//!
//! Manages database schema versioning. Each migration is a `migrate_vN`
//! function applied in order; the applied version is recorded in the
//! `schema_version` table so running migrations twice is a no-op.
//!
//! ## Adding New Migrations
//!
//! 1. Increment `SCHEMA_VERSION`
//! 2. Add a new `migrate_vN` function
//! 3. Call it from `run_migrations`

use rusqlite::Connection;
use tracing::{debug, error, info};

use super::connection::DatabaseError;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Outcome of a migration run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    /// Version before the run
    pub from_version: i32,
    /// Version after the run
    pub to_version: i32,
}

impl MigrationReport {
    /// Whether any migration was applied
    #[must_use]
    pub const fn applied(&self) -> bool {
        self.to_version > self.from_version
    }
}

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> Result<MigrationReport, DatabaseError> {
    let current_version = get_schema_version(conn)?;

    if current_version < SCHEMA_VERSION {
        info!(
            from_version = current_version,
            to_version = SCHEMA_VERSION,
            "Running database migrations"
        );

        if current_version < 1 {
            if let Err(e) = migrate_v1(conn) {
                error!(
                    version = 1,
                    error = %e,
                    "Migration V001 (forecast overrides) failed"
                );
                return Err(e);
            }
        }

        set_schema_version(conn, SCHEMA_VERSION)?;
        info!(version = SCHEMA_VERSION, "Database migrations complete");
    } else {
        debug!(version = current_version, "Database schema is up to date");
    }

    Ok(MigrationReport {
        from_version: current_version,
        to_version: current_version.max(SCHEMA_VERSION),
    })
}

/// Get current schema version
pub fn get_schema_version(conn: &Connection) -> Result<i32, DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;

    Ok(version)
}

/// Set schema version
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Migration to version 1: forecast overrides
fn migrate_v1(conn: &Connection) -> Result<(), DatabaseError> {
    debug!("Applying migration V001: forecast overrides");

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS forecast_overrides (
            id TEXT PRIMARY KEY,
            city TEXT NOT NULL CHECK(length(city) BETWEEN 1 AND 20),
            date TEXT NOT NULL,
            min_temperature REAL NOT NULL,
            max_temperature REAL NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE(city, date),
            CHECK(min_temperature <= max_temperature)
        );

        CREATE INDEX IF NOT EXISTS idx_forecast_overrides_date ON forecast_overrides(date);
        ",
    )?;

    Ok(())
}
