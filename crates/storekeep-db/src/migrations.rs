//! # Database Migrations
//!
//! Embedded SQL migrations for storekeep.
//!
//! Migrations live in `migrations/sqlite/` at the workspace root and are
//! compiled into the binary by `sqlx::migrate!`. Applied migrations are
//! tracked in the `_sqlx_migrations` table, so running them is idempotent.
//!
//! ## Adding New Migrations
//! 1. Create a new file `migrations/sqlite/NNN_description.sql` with the
//!    next sequence number
//! 2. Write idempotent SQL (use `IF NOT EXISTS` where possible)
//! 3. NEVER modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// Safe to run multiple times; each migration runs in its own
/// transaction, in filename order.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("all migrations applied");
    Ok(())
}
