//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! synthseed migrate
//! ```
//!
//! Reads `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD` and `DB_NAME` and
//! applies the migrations embedded from `crates/seeder/migrations/`.

use tracing::info;

use synthseed::DatabaseConfig;
use synthseed::db;

use super::CommandError;

/// Run database migrations.
///
/// # Errors
///
/// Returns an error if configuration is missing, the database is unreachable,
/// or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let config = DatabaseConfig::load()?;

    info!(host = %config.host, database = %config.database, "Connecting to database...");
    let pool = db::create_pool(&config).await?;

    info!("Running migrations...");
    db::run_migrations(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
