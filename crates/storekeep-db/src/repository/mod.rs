//! # Repository Module
//!
//! One repository per entity, each a thin wrapper around the pool that
//! issues parameterized SQL and maps rows to the storekeep-core types.
//! No permission checks here - that is the services' job.
//!
//! ## Available Repositories
//!
//! - [`user::UserRepository`] - user accounts
//! - [`store::StoreRepository`] - stores
//! - [`item::ItemRepository`] - inventory items and stock updates
//! - [`whitelist::WhitelistRepository`] - registration pre-approvals
//! - [`store_access::StoreAccessRepository`] - (user, store) grants

pub mod item;
pub mod store;
pub mod store_access;
pub mod user;
pub mod whitelist;

use uuid::Uuid;

/// Generates a fresh entity ID (UUID v4).
pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
