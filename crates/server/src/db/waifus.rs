//! Waifu repository for `PostgreSQL`.
//!
//! Queries are checked at runtime (`sqlx::query_as`) so the crate builds
//! without a live database. Every statement filters on `owner_id`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use waifu_tracker_core::{NewWaifu, OwnerId, WaifuId, WaifuRecord};

use super::RepositoryError;

/// Raw `tracker.waifu` row.
#[derive(Debug, sqlx::FromRow)]
struct WaifuRow {
    id: WaifuId,
    owner_id: String,
    name: String,
    image_url: Option<String>,
    about: Option<String>,
    birthday_month: Option<i32>,
    birthday_day: Option<i32>,
    created_at: DateTime<Utc>,
}

impl TryFrom<WaifuRow> for WaifuRecord {
    type Error = RepositoryError;

    fn try_from(row: WaifuRow) -> Result<Self, Self::Error> {
        let owner_id = OwnerId::parse(&row.owner_id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid owner id in database: {e}"))
        })?;
        let birthday_month = row
            .birthday_month
            .map(u32::try_from)
            .transpose()
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid birthday month: {e}")))?;
        let birthday_day = row
            .birthday_day
            .map(u32::try_from)
            .transpose()
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid birthday day: {e}")))?;

        Ok(Self {
            id: row.id,
            owner_id,
            name: row.name,
            image_url: row.image_url,
            about: row.about,
            birthday_month,
            birthday_day,
            created_at: row.created_at,
        })
    }
}

fn to_db_part(value: Option<u32>) -> Result<Option<i32>, RepositoryError> {
    value
        .map(i32::try_from)
        .transpose()
        .map_err(|e| RepositoryError::Conflict(format!("birthday out of range: {e}")))
}

/// Repository for waifu database operations.
#[derive(Clone)]
pub struct WaifuRepository {
    pool: PgPool,
}

impl WaifuRepository {
    /// Create a new waifu repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Round-trip a trivial query.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Get an owner's record by exact name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn find_by_name(
        &self,
        owner: &OwnerId,
        name: &str,
    ) -> Result<Option<WaifuRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, WaifuRow>(
            r"
            SELECT id, owner_id, name, image_url, about,
                   birthday_month, birthday_day, created_at
            FROM tracker.waifu
            WHERE owner_id = $1 AND name = $2
            ORDER BY id
            LIMIT 1
            ",
        )
        .bind(owner.as_str())
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(WaifuRecord::try_from).transpose()
    }

    /// Insert a new record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a birthday part does not fit the column.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, waifu: &NewWaifu) -> Result<WaifuRecord, RepositoryError> {
        let row = sqlx::query_as::<_, WaifuRow>(
            r"
            INSERT INTO tracker.waifu
                (owner_id, name, image_url, about, birthday_month, birthday_day)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, owner_id, name, image_url, about,
                      birthday_month, birthday_day, created_at
            ",
        )
        .bind(waifu.owner_id.as_str())
        .bind(&waifu.name)
        .bind(waifu.image_url.as_deref())
        .bind(waifu.about.as_deref())
        .bind(to_db_part(waifu.birthday_month)?)
        .bind(to_db_part(waifu.birthday_day)?)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_check_violation()
            {
                return RepositoryError::Conflict("birthday out of range".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        WaifuRecord::try_from(row)
    }

    /// List an owner's records in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<WaifuRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, WaifuRow>(
            r"
            SELECT id, owner_id, name, image_url, about,
                   birthday_month, birthday_day, created_at
            FROM tracker.waifu
            WHERE owner_id = $1
            ORDER BY id
            ",
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(WaifuRecord::try_from).collect()
    }

    /// Delete a record owned by `owner`.
    ///
    /// # Returns
    ///
    /// Returns `true` if a row was deleted, `false` if no row matched both the
    /// id and the owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, owner: &OwnerId, id: WaifuId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM tracker.waifu
            WHERE id = $1 AND owner_id = $2
            ",
        )
        .bind(id)
        .bind(owner.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
