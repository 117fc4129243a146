//! # Store Repository
//!
//! Database operations for stores.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::generate_id;
use storekeep_core::Store;

/// Repository for store database operations.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    /// Creates a new StoreRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StoreRepository { pool }
    }

    /// Inserts a new store and returns the stored row.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - store name already taken
    pub async fn insert(&self, name: &str) -> DbResult<Store> {
        let store = Store {
            id: generate_id(),
            name: name.to_string(),
            created_at: Utc::now(),
        };

        debug!(name = %store.name, "inserting store");

        sqlx::query("INSERT INTO stores (id, name, created_at) VALUES (?1, ?2, ?3)")
            .bind(&store.id)
            .bind(&store.name)
            .bind(store.created_at)
            .execute(&self.pool)
            .await?;

        Ok(store)
    }

    /// Gets a store by ID.
    pub async fn find_by_id(&self, id: &str) -> DbResult<Option<Store>> {
        let store =
            sqlx::query_as::<_, Store>("SELECT id, name, created_at FROM stores WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(store)
    }

    /// Checks whether a store with the given name exists,
    /// case-insensitively.
    pub async fn name_exists(&self, name: &str) -> DbResult<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM stores WHERE LOWER(name) = LOWER(?1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        Ok(count > 0)
    }

    /// Lists all stores, sorted by name.
    pub async fn all(&self) -> DbResult<Vec<Store>> {
        let stores =
            sqlx::query_as::<_, Store>("SELECT id, name, created_at FROM stores ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(stores)
    }

    /// Deletes a store row.
    ///
    /// The store service removes items and grants first; the schema's
    /// ON DELETE CASCADE is the backstop.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - store doesn't exist
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "deleting store");

        let result = sqlx::query("DELETE FROM stores WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("store", id));
        }

        Ok(())
    }
}
