//! # Store Access Repository
//!
//! Database operations for the (user, store) access grants.
//!
//! Administrators never appear here: their access to every store is
//! implicit and decided in the service layer.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use storekeep_core::{Store, StoreAccess, User};

/// Repository for store-access database operations.
#[derive(Debug, Clone)]
pub struct StoreAccessRepository {
    pool: SqlitePool,
}

impl StoreAccessRepository {
    /// Creates a new StoreAccessRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StoreAccessRepository { pool }
    }

    /// Grants a user access to a store.
    ///
    /// Idempotent: granting an existing access is a no-op success
    /// (`INSERT OR IGNORE` on the composite primary key).
    pub async fn grant(&self, user_id: &str, store_id: &str) -> DbResult<()> {
        debug!(user_id = %user_id, store_id = %store_id, "granting store access");

        sqlx::query("INSERT OR IGNORE INTO store_access (user_id, store_id) VALUES (?1, ?2)")
            .bind(user_id)
            .bind(store_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Revokes a user's access to a store.
    ///
    /// ## Returns
    /// * `Ok(true)` - a grant existed and was removed
    /// * `Ok(false)` - no such grant
    pub async fn revoke(&self, user_id: &str, store_id: &str) -> DbResult<bool> {
        debug!(user_id = %user_id, store_id = %store_id, "revoking store access");

        let result = sqlx::query("DELETE FROM store_access WHERE user_id = ?1 AND store_id = ?2")
            .bind(user_id)
            .bind(store_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Gets the grant row for a (user, store) pair, if any.
    pub async fn find_grant(&self, user_id: &str, store_id: &str) -> DbResult<Option<StoreAccess>> {
        let grant = sqlx::query_as::<_, StoreAccess>(
            r#"
            SELECT user_id, store_id
            FROM store_access
            WHERE user_id = ?1 AND store_id = ?2
            "#,
        )
        .bind(user_id)
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(grant)
    }

    /// Checks whether a user holds an explicit grant for a store.
    pub async fn has_access(&self, user_id: &str, store_id: &str) -> DbResult<bool> {
        Ok(self.find_grant(user_id, store_id).await?.is_some())
    }

    /// Lists the stores a user has been granted access to, sorted by name.
    pub async fn stores_for_user(&self, user_id: &str) -> DbResult<Vec<Store>> {
        let stores = sqlx::query_as::<_, Store>(
            r#"
            SELECT s.id, s.name, s.created_at
            FROM stores s
            INNER JOIN store_access sa ON sa.store_id = s.id
            WHERE sa.user_id = ?1
            ORDER BY s.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stores)
    }

    /// Lists the users holding a grant for a store, sorted by pseudo.
    pub async fn users_for_store(&self, store_id: &str) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.email, u.pseudo, u.password_hash, u.role, u.created_at, u.updated_at
            FROM users u
            INNER JOIN store_access sa ON sa.user_id = u.id
            WHERE sa.store_id = ?1
            ORDER BY u.pseudo
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Removes every grant held by a user. Returns the number of removed
    /// rows.
    pub async fn revoke_all_for_user(&self, user_id: &str) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM store_access WHERE user_id = ?1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        debug!(user_id = %user_id, revoked = result.rows_affected(), "revoked user grants");

        Ok(result.rows_affected())
    }

    /// Removes every grant pointing at a store. Returns the number of
    /// removed rows.
    pub async fn revoke_all_for_store(&self, store_id: &str) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM store_access WHERE store_id = ?1")
            .bind(store_id)
            .execute(&self.pool)
            .await?;

        debug!(store_id = %store_id, revoked = result.rows_affected(), "revoked store grants");

        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
