//! # Domain Types
//!
//! Core domain types used throughout storekeep.
//!
//! ## Type Hierarchy
//! ```text
//! User ──< StoreAccess >── Store ──< Item
//!                                      │
//! WhitelistEntry (pre-approval,        └ price_cents / quantity
//!  consumed at registration)
//! ```
//!
//! Every entity uses a UUID v4 string as its immutable identifier; the
//! human-facing identifiers (email, store name) are mutable and unique
//! case-insensitively.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::MASKED_PASSWORD;

// =============================================================================
// Role
// =============================================================================

/// Access level of a user account.
///
/// ADMIN has full control; EMPLOYEE is limited to the stores they were
/// granted access to, with non-destructive operations only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(rename_all = "UPPERCASE"))]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    /// Checks whether this role is the administrator role.
    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

// =============================================================================
// User
// =============================================================================

/// A user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Email, stored normalized (trimmed, lowercase). Unique
    /// case-insensitively.
    pub email: String,

    /// Display name.
    pub pseudo: String,

    /// Salted argon2 digest of the password. Read paths replace this with
    /// [`MASKED_PASSWORD`] before handing the user to a caller.
    pub password_hash: String,

    /// Account role.
    pub role: Role,

    /// When the account was created.
    pub created_at: DateTime<Utc>,

    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Checks whether this user is an administrator.
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns a copy with the password hash replaced by the fixed
    /// placeholder. Used on every list/get path so a real hash never
    /// leaves the service layer.
    pub fn masked(&self) -> User {
        User {
            password_hash: MASKED_PASSWORD.to_string(),
            ..self.clone()
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// A store owning a set of inventory items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Store {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Store name, unique case-insensitively.
    pub name: String,

    /// When the store was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Item
// =============================================================================

/// An inventory item belonging to a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Item {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Price in cents, never negative.
    pub price_cents: i64,

    /// Stock level, never negative.
    pub quantity: i64,

    /// Owning store.
    pub store_id: String,

    /// When the item was created.
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Returns the price as a [`Money`] value.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Store Access
// =============================================================================

/// A (user, store) access grant.
///
/// ADMIN users have implicit access to every store and never need a grant
/// row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StoreAccess {
    pub user_id: String,
    pub store_id: String,
}

// =============================================================================
// Whitelist Entry
// =============================================================================

/// A pre-approved email allowed to self-register.
///
/// The entry is deleted once the registration succeeds; it is irrelevant
/// after the account exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct WhitelistEntry {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Email, stored normalized (trimmed, lowercase). Unique
    /// case-insensitively.
    pub email: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
