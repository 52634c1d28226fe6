//! `migrate` command

use infrastructure::{
    DatabaseConfig, create_pool,
    persistence::{MigrationReport, run_migrations},
};
use tracing::info;

/// Bring the database at `config.path` to the current schema version
pub fn migrate_database(config: &DatabaseConfig) -> anyhow::Result<MigrationReport> {
    let pool = create_pool(&DatabaseConfig {
        max_connections: 1,
        run_migrations: false,
        ..config.clone()
    })?;
    let conn = pool.get()?;
    let report = run_migrations(&conn)?;

    info!(
        path = %config.path,
        from = report.from_version,
        to = report.to_version,
        "Migration finished"
    );
    Ok(report)
}
