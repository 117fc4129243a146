//! # storekeep-services: Domain Services
//!
//! The service layer of storekeep: every operation the presentation layer
//! can invoke, with validation, permission checks and persistence calls
//! behind one typed API.
//!
//! ## Architecture Position
//! ```text
//! Presentation (GUI / API, out of scope)
//!        │  passes a Session + raw input
//!        ▼
//! THIS CRATE   auth • users • stores • inventory • whitelist
//!        │
//!        ├──► storekeep-core   validation, money, domain types
//!        └──► storekeep-db     repositories over SQLite
//! ```
//!
//! ## Conventions
//!
//! - Every operation returns [`error::ServiceResult`]: `Ok(payload)` or a
//!   [`error::ServiceError`] whose message is shown to the user and whose
//!   [`error::ErrorKind`] tells the caller how to present it.
//! - The caller identity is a [`session::Session`] value passed into each
//!   call; there is no process-wide current user.
//! - Read paths mask password hashes; a real digest never crosses this
//!   crate's boundary.

pub mod auth;
pub mod error;
pub mod inventory;
pub mod password;
pub mod session;
pub mod store;
pub mod user;
pub mod whitelist;

pub use auth::AuthService;
pub use error::{ErrorKind, ServiceError, ServiceResult};
pub use inventory::InventoryService;
pub use session::Session;
pub use store::StoreService;
pub use user::UserService;
pub use whitelist::WhitelistService;

// =============================================================================
// Test Utilities
// =============================================================================

#[cfg(test)]
pub(crate) mod testutil {
    use storekeep_core::User;
    use storekeep_db::{Database, DbConfig};

    use crate::auth::AuthService;
    use crate::session::Session;

    /// Fresh in-memory database with the schema applied.
    pub async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    /// Registers the first account (admin@x.com / secret1) and logs it in.
    pub async fn register_admin(db: &Database) -> (Session, User) {
        let auth = AuthService::new(db.clone());
        let user = auth
            .register("admin@x.com", "Admin", "secret1", "secret1")
            .await
            .unwrap();

        let mut session = Session::new();
        auth.login(&mut session, "admin@x.com", "secret1")
            .await
            .unwrap();

        (session, user)
    }

    /// Whitelists and registers an employee account (password secret1).
    pub async fn register_employee(db: &Database, email: &str, pseudo: &str) -> User {
        db.whitelist().insert(email).await.unwrap();

        AuthService::new(db.clone())
            .register(email, pseudo, "secret1", "secret1")
            .await
            .unwrap()
    }

    /// Logs an existing account in (password secret1) on a new session.
    pub async fn login(db: &Database, email: &str) -> Session {
        let mut session = Session::new();
        AuthService::new(db.clone())
            .login(&mut session, email, "secret1")
            .await
            .unwrap();
        session
    }
}

// =============================================================================
// End-to-End Scenario
// =============================================================================
