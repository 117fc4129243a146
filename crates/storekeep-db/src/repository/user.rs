//! # User Repository
//!
//! Database operations for user accounts.
//!
//! Emails are stored normalized (lowercase) by the service layer, and
//! every email lookup additionally compares case-insensitively, matching
//! the `COLLATE NOCASE` unique index on the column.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::generate_id;
use storekeep_core::{Role, User};

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user and returns the stored row.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - email already taken
    pub async fn insert(
        &self,
        email: &str,
        pseudo: &str,
        password_hash: &str,
        role: Role,
    ) -> DbResult<User> {
        let user = User {
            id: generate_id(),
            email: email.to_string(),
            pseudo: pseudo.to_string(),
            password_hash: password_hash.to_string(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        debug!(email = %user.email, "inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (id, email, pseudo, password_hash, role, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.pseudo)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by ID.
    pub async fn find_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, pseudo, password_hash, role, created_at, updated_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by email, case-insensitively.
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, pseudo, password_hash, role, created_at, updated_at
            FROM users
            WHERE LOWER(email) = LOWER(?1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Checks whether an account exists for the given email.
    pub async fn email_exists(&self, email: &str) -> DbResult<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE LOWER(email) = LOWER(?1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(count > 0)
    }

    /// Lists all users, oldest account first.
    pub async fn all(&self) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, pseudo, password_hash, role, created_at, updated_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Updates an existing user's mutable fields.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - user doesn't exist
    pub async fn update(&self, user: &User) -> DbResult<()> {
        debug!(id = %user.id, "updating user");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = ?2,
                pseudo = ?3,
                password_hash = ?4,
                role = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.pseudo)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("user", &user.id));
        }

        Ok(())
    }

    /// Deletes a user.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - user doesn't exist
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "deleting user");

        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("user", id));
        }

        Ok(())
    }

    /// Counts all user accounts.
    ///
    /// Registration uses this to detect the first-ever account, which is
    /// always created as an administrator.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find_by_email_case_insensitive() {
        let db = test_db().await;
        let repo = db.users();

        let user = repo
            .insert("alice@example.com", "Alice", "hash", Role::Admin)
            .await
            .unwrap();

        let found = repo.find_by_email("ALICE@Example.COM").await.unwrap();
        assert_eq!(found.unwrap().id, user.id);

        assert!(repo.email_exists("Alice@example.com").await.unwrap());
        assert!(!repo.email_exists("bob@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_by_schema() {
        let db = test_db().await;
        let repo = db.users();

        repo.insert("alice@example.com", "Alice", "hash", Role::Admin)
            .await
            .unwrap();

        let err = repo
            .insert("ALICE@EXAMPLE.COM", "Imposter", "hash2", Role::Employee)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_count_tracks_inserts_and_deletes() {
        let db = test_db().await;
        let repo = db.users();

        assert_eq!(repo.count().await.unwrap(), 0);

        let user = repo
            .insert("alice@example.com", "Alice", "hash", Role::Admin)
            .await
            .unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        repo.delete(&user.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);

        let err = repo.delete(&user.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
