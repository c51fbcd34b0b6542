//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! waifu-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `WAIFU_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Stored in `crates/server/migrations/`:
//! ```text
//! migrations/
//! └── 20260101000001_create_waifu.sql
//! ```

use waifu_tracker_server::config::{ConfigError, TrackerConfig};
use waifu_tracker_server::db;

/// Errors from the migrate command.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Apply all pending migrations to the configured database.
///
/// # Errors
///
/// Returns `MigrationError::MissingEnvVar` if no database URL is configured.
pub async fn run() -> Result<(), MigrationError> {
    let config = TrackerConfig::from_env()?;
    let database_url = config
        .database_url
        .as_ref()
        .ok_or(MigrationError::MissingEnvVar("WAIFU_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(database_url).await?;

    tracing::info!("Running migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
