//! # storekeep-core: Pure Business Logic for storekeep
//!
//! This crate is the heart of storekeep. It contains the business rules
//! as pure functions and types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! Presentation (GUI / API, out of scope)
//!        │
//!        ▼
//! storekeep-services  (auth, users, stores, inventory, whitelist)
//!        │
//!        ▼
//! storekeep-core (THIS CRATE)  -  types • money • validation • errors
//!        │
//!        ▼
//! storekeep-db  (SQLite queries, migrations, repositories)
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Store, Item, WhitelistEntry, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`validation`] - Input validation rules
//! - [`error`] - Validation error types
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: every function is deterministic
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer money**: all prices are in cents (i64) to avoid float errors
//! 4. **Explicit errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum password length accepted at registration and password change.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum pseudo (display name) length, counted after trimming.
pub const MIN_PSEUDO_LENGTH: usize = 2;

/// Minimum store name length, counted after trimming.
pub const MIN_STORE_NAME_LENGTH: usize = 2;

/// Placeholder substituted for the password hash on read paths.
///
/// Display hygiene, not a security boundary: list/get operations never
/// return a real hash, they return this fixed string instead.
pub const MASKED_PASSWORD: &str = "[PROTECTED]";
