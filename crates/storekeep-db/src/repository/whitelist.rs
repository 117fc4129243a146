//! # Whitelist Repository
//!
//! Database operations for registration pre-approvals.
//!
//! An entry is one-shot: registration deletes it once the matching
//! account has been created.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::generate_id;
use storekeep_core::WhitelistEntry;

/// Repository for whitelist database operations.
#[derive(Debug, Clone)]
pub struct WhitelistRepository {
    pool: SqlitePool,
}

impl WhitelistRepository {
    /// Creates a new WhitelistRepository.
    pub fn new(pool: SqlitePool) -> Self {
        WhitelistRepository { pool }
    }

    /// Inserts a new whitelist entry and returns the stored row.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - email already whitelisted
    pub async fn insert(&self, email: &str) -> DbResult<WhitelistEntry> {
        let entry = WhitelistEntry {
            id: generate_id(),
            email: email.to_string(),
        };

        debug!(email = %entry.email, "whitelisting email");

        sqlx::query("INSERT INTO whitelist (id, email) VALUES (?1, ?2)")
            .bind(&entry.id)
            .bind(&entry.email)
            .execute(&self.pool)
            .await?;

        Ok(entry)
    }

    /// Gets a whitelist entry by ID.
    pub async fn find_by_id(&self, id: &str) -> DbResult<Option<WhitelistEntry>> {
        let entry =
            sqlx::query_as::<_, WhitelistEntry>("SELECT id, email FROM whitelist WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(entry)
    }

    /// Checks whether an email is whitelisted, case-insensitively.
    pub async fn is_whitelisted(&self, email: &str) -> DbResult<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM whitelist WHERE LOWER(email) = LOWER(?1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(count > 0)
    }

    /// Lists all whitelist entries, sorted by email.
    pub async fn all(&self) -> DbResult<Vec<WhitelistEntry>> {
        let entries =
            sqlx::query_as::<_, WhitelistEntry>("SELECT id, email FROM whitelist ORDER BY email")
                .fetch_all(&self.pool)
                .await?;

        Ok(entries)
    }

    /// Deletes a whitelist entry by ID.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - entry doesn't exist
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "removing whitelist entry");

        let result = sqlx::query("DELETE FROM whitelist WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("whitelist entry", id));
        }

        Ok(())
    }

    /// Deletes a whitelist entry by email, case-insensitively.
    ///
    /// Used when registration consumes an entry; deleting an email that is
    /// not present is not an error.
    pub async fn delete_by_email(&self, email: &str) -> DbResult<()> {
        debug!(email = %email, "consuming whitelist entry");

        sqlx::query("DELETE FROM whitelist WHERE LOWER(email) = LOWER(?1)")
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
