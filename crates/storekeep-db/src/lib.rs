//! # storekeep-db: Database Layer
//!
//! SQLite persistence for storekeep, built on sqlx.
//!
//! ## Layout
//!
//! - [`pool`] - Connection pool creation and the [`Database`] handle
//! - [`migrations`] - Embedded schema migrations
//! - [`repository`] - One repository per entity (users, stores, items,
//!   whitelist, store access)
//! - [`error`] - [`DbError`] and sqlx error classification
//!
//! ## Usage
//! ```rust,ignore
//! let db = Database::new(DbConfig::new("./storekeep.db")).await?;
//! let user = db.users().find_by_email("alice@example.com").await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
