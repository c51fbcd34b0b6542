//! Record storage for saved waifus.
//!
//! # Database: `waifu_db`
//!
//! ## Tables
//!
//! - `tracker.waifu` - Saved characters, one row per (owner, character) add
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p waifu-tracker-cli -- migrate
//! ```
//!
//! # Backends
//!
//! [`WaifuStore`] is either `PostgreSQL` ([`WaifuRepository`]) or a process-local
//! map ([`InMemoryWaifuStore`]) used when no database is configured and in tests.
//! Every operation takes the owner id and filters on it.

mod memory;
mod waifus;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use waifu_tracker_core::{NewWaifu, OwnerId, WaifuId, WaifuRecord};

pub use memory::InMemoryWaifuStore;
pub use waifus::WaifuRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation.
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// No further record ids can be assigned.
    #[error("record ids exhausted")]
    IdsExhausted,
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Apply pending migrations from `crates/server/migrations/`.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// The record store backing the API.
#[derive(Clone)]
pub enum WaifuStore {
    Postgres(WaifuRepository),
    Memory(InMemoryWaifuStore),
}

impl WaifuStore {
    /// Short backend name for logs.
    #[must_use]
    pub const fn backend(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    /// Check that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the database does not answer.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        match self {
            Self::Postgres(repo) => repo.ping().await,
            Self::Memory(_) => Ok(()),
        }
    }

    /// Find an owner's record by exact name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the lookup fails.
    pub async fn find_by_name(
        &self,
        owner: &OwnerId,
        name: &str,
    ) -> Result<Option<WaifuRecord>, RepositoryError> {
        match self {
            Self::Postgres(repo) => repo.find_by_name(owner, name).await,
            Self::Memory(store) => Ok(store.find_by_name(owner, name).await),
        }
    }

    /// Store a new record and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the insert fails.
    pub async fn create(&self, waifu: NewWaifu) -> Result<WaifuRecord, RepositoryError> {
        match self {
            Self::Postgres(repo) => repo.create(&waifu).await,
            Self::Memory(store) => store.create(waifu).await,
        }
    }

    /// All records belonging to `owner`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<WaifuRecord>, RepositoryError> {
        match self {
            Self::Postgres(repo) => repo.list_by_owner(owner).await,
            Self::Memory(store) => Ok(store.list_by_owner(owner).await),
        }
    }

    /// Delete a record if it belongs to `owner`.
    ///
    /// # Returns
    ///
    /// Returns `true` if the record was deleted, `false` if it didn't exist or
    /// belongs to someone else.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn delete(&self, owner: &OwnerId, id: WaifuId) -> Result<bool, RepositoryError> {
        match self {
            Self::Postgres(repo) => repo.delete(owner, id).await,
            Self::Memory(store) => Ok(store.delete(owner, id).await),
        }
    }
}
