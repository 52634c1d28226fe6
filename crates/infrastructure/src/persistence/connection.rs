//! Database connection management
//!
//! Provides SQLite connection pooling via r2d2.

use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DatabaseConfig;

/// Database errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Database directory could not be created: {0}")]
    Io(#[from] std::io::Error),
}

/// SQLite connection pool type alias
pub type ConnectionPool = Pool<SqliteConnectionManager>;

const IN_MEMORY_PATH: &str = ":memory:";

/// Busy timeout applied to every pooled connection
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Create a connection pool for the configured database
///
/// Every connection handed out by the pool has foreign keys enabled and a
/// busy timeout set. File databases are switched to WAL once. Pending
/// migrations run when `config.run_migrations` is set.
pub fn create_pool(config: &DatabaseConfig) -> Result<ConnectionPool, DatabaseError> {
    let in_memory = config.path == IN_MEMORY_PATH;
    info!(
        path = %config.path,
        max_connections = config.max_connections,
        "Opening SQLite database"
    );

    let manager = if in_memory {
        SqliteConnectionManager::memory()
    } else {
        ensure_parent_dir(Path::new(&config.path))?;
        SqliteConnectionManager::file(&config.path)
    }
    .with_init(configure_connection);

    let pool = Pool::builder()
        .max_size(config.max_connections.max(1))
        .build(manager)?;

    let conn = pool.get()?;
    if !in_memory {
        let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        debug!(journal_mode = %mode, "Journal mode set");
    }
    if config.run_migrations {
        crate::persistence::migrations::run_migrations(&conn)?;
    }

    Ok(pool)
}

fn ensure_parent_dir(path: &Path) -> Result<(), DatabaseError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(std::fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}

/// Per-connection settings; SQLite does not persist these in the file
fn configure_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(&format!(
        "PRAGMA foreign_keys = ON;
         PRAGMA synchronous = NORMAL;
         PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"
    ))
}
