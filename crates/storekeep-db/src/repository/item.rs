//! # Item Repository
//!
//! Database operations for inventory items, including the atomic stock
//! adjustments.
//!
//! ## Stock Update Strategy
//! ```text
//! WRONG (read-then-write, races past the floor under concurrency):
//!     SELECT quantity ...; UPDATE items SET quantity = <computed> ...
//!
//! RIGHT (single conditional statement, checked by affected-row count):
//!     UPDATE items SET quantity = quantity - ?2
//!     WHERE id = ?1 AND quantity >= ?2
//! ```
//! The `CHECK (quantity >= 0)` schema constraint is the last line of
//! defense; the conditional update means it is never hit in practice.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::generate_id;
use storekeep_core::Item;

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Inserts a new item and returns the stored row.
    ///
    /// ## Errors
    /// * `DbError::ForeignKeyViolation` - owning store doesn't exist
    pub async fn insert(
        &self,
        name: &str,
        price_cents: i64,
        quantity: i64,
        store_id: &str,
    ) -> DbResult<Item> {
        let item = Item {
            id: generate_id(),
            name: name.to_string(),
            price_cents,
            quantity,
            store_id: store_id.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        debug!(name = %item.name, store_id = %item.store_id, "inserting item");

        sqlx::query(
            r#"
            INSERT INTO items (id, name, price_cents, quantity, store_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.price_cents)
        .bind(item.quantity)
        .bind(&item.store_id)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    /// Gets an item by ID.
    pub async fn find_by_id(&self, id: &str) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, price_cents, quantity, store_id, created_at, updated_at
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Lists a store's items, sorted by name.
    pub async fn find_by_store(&self, store_id: &str) -> DbResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, price_cents, quantity, store_id, created_at, updated_at
            FROM items
            WHERE store_id = ?1
            ORDER BY name
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Updates an item's name, price and quantity.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - item doesn't exist
    pub async fn update(&self, item: &Item) -> DbResult<()> {
        debug!(id = %item.id, "updating item");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE items SET
                name = ?2,
                price_cents = ?3,
                quantity = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.price_cents)
        .bind(item.quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("item", &item.id));
        }

        Ok(())
    }

    /// Increases an item's stock by `amount` in a single statement.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - item doesn't exist
    pub async fn increase_quantity(&self, id: &str, amount: i64) -> DbResult<()> {
        debug!(id = %id, amount = %amount, "increasing stock");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE items
            SET quantity = quantity + ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(amount)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("item", id));
        }

        Ok(())
    }

    /// Decreases an item's stock by `amount`, but only if enough stock is
    /// available. The condition and the write are one statement, so
    /// concurrent decrements cannot race past zero.
    ///
    /// ## Returns
    /// * `Ok(true)` - stock was decremented
    /// * `Ok(false)` - insufficient stock (or no such item); nothing changed
    pub async fn decrease_quantity(&self, id: &str, amount: i64) -> DbResult<bool> {
        debug!(id = %id, amount = %amount, "decreasing stock");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE items
            SET quantity = quantity - ?2, updated_at = ?3
            WHERE id = ?1 AND quantity >= ?2
            "#,
        )
        .bind(id)
        .bind(amount)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes an item.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - item doesn't exist
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "deleting item");

        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("item", id));
        }

        Ok(())
    }

    /// Deletes all items belonging to a store. Returns the number of
    /// deleted rows.
    pub async fn delete_by_store(&self, store_id: &str) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM items WHERE store_id = ?1")
            .bind(store_id)
            .execute(&self.pool)
            .await?;

        debug!(store_id = %store_id, deleted = result.rows_affected(), "deleted store items");

        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn db_with_store() -> (Database, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = db.stores().insert("Main").await.unwrap();
        (db, store.id)
    }

    #[tokio::test]
    async fn test_decrease_respects_the_floor() {
        let (db, store_id) = db_with_store().await;
        let repo = db.items();

        let item = repo.insert("Widget", 999, 10, &store_id).await.unwrap();

        // more than available: refused, quantity untouched
        assert!(!repo.decrease_quantity(&item.id, 15).await.unwrap());
        let current = repo.find_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(current.quantity, 10);

        // exactly available: drains to zero
        assert!(repo.decrease_quantity(&item.id, 10).await.unwrap());
        let current = repo.find_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(current.quantity, 0);

        // nothing left
        assert!(!repo.decrease_quantity(&item.id, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_increase_accumulates() {
        let (db, store_id) = db_with_store().await;
        let repo = db.items();

        let item = repo.insert("Widget", 999, 0, &store_id).await.unwrap();

        repo.increase_quantity(&item.id, 3).await.unwrap();
        repo.increase_quantity(&item.id, 4).await.unwrap();

        let current = repo.find_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(current.quantity, 7);
    }

    #[tokio::test]
    async fn test_insert_requires_existing_store() {
        let (db, _store_id) = db_with_store().await;

        let err = db
            .items()
            .insert("Orphan", 100, 1, "no-such-store")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_delete_by_store_removes_all_items() {
        let (db, store_id) = db_with_store().await;
        let repo = db.items();

        repo.insert("A", 100, 1, &store_id).await.unwrap();
        repo.insert("B", 200, 2, &store_id).await.unwrap();

        assert_eq!(repo.delete_by_store(&store_id).await.unwrap(), 2);
        assert!(repo.find_by_store(&store_id).await.unwrap().is_empty());
    }
}
