//! # Auth Service
//!
//! Login, whitelist-gated registration and logout.
//!
//! ## Registration Flow
//! ```text
//! validate email → pseudo → password → confirmation
//!      │
//!      ▼
//! email already registered?  ──►  "an account already exists..."
//!      │
//!      ▼
//! first account ever?  ──► yes: bypass whitelist, role = ADMIN
//!      │ no
//!      ▼
//! email whitelisted?  ──►  no: "not authorized to register..."
//!      │ yes
//!      ▼
//! hash password, insert user (EMPLOYEE), consume whitelist entry
//! ```
//!
//! The validation order above is part of the contract: callers get a
//! deterministic first error.

use tracing::info;

use storekeep_core::{validation, Role, User, ValidationError};
use storekeep_db::Database;

use crate::error::{ServiceError, ServiceResult};
use crate::password;
use crate::session::Session;

/// Authentication service.
#[derive(Debug, Clone)]
pub struct AuthService {
    db: Database,
}

impl AuthService {
    /// Creates a new AuthService.
    pub fn new(db: Database) -> Self {
        AuthService { db }
    }

    /// Logs a user in and binds them to the session.
    ///
    /// Unknown email and wrong password fail with the same
    /// "incorrect email or password" message, so the login form cannot be
    /// used to probe which accounts exist.
    pub async fn login(
        &self,
        session: &mut Session,
        email: &str,
        password: &str,
    ) -> ServiceResult<User> {
        let email = validation::validate_email(email)?;

        if password.trim().is_empty() {
            return Err(ValidationError::Required { field: "password" }.into());
        }

        let user = match self.db.users().find_by_email(&email).await? {
            Some(user) => user,
            None => return Err(ServiceError::InvalidCredentials),
        };

        if !password::verify_password(password, &user.password_hash) {
            return Err(ServiceError::InvalidCredentials);
        }

        session.set_current_user(user.clone());
        info!(user_id = %user.id, "user logged in");

        Ok(user)
    }

    /// Registers a new account.
    ///
    /// The first account ever created is an administrator and bypasses
    /// the whitelist; every later registration requires a whitelist entry,
    /// which is consumed (deleted) on success. Registration does not log
    /// the new user in.
    pub async fn register(
        &self,
        email: &str,
        pseudo: &str,
        password: &str,
        confirm_password: &str,
    ) -> ServiceResult<User> {
        let email = validation::validate_email(email)?;
        let pseudo = validation::validate_pseudo(pseudo)?;
        validation::validate_password(password)?;

        if password != confirm_password {
            return Err(ServiceError::PasswordMismatch);
        }

        if self.db.users().email_exists(&email).await? {
            return Err(ServiceError::EmailTaken);
        }

        let is_first_user = self.db.users().count().await? == 0;

        if !is_first_user && !self.db.whitelist().is_whitelisted(&email).await? {
            return Err(ServiceError::NotWhitelisted);
        }

        let password_hash = password::hash_password(password)?;
        let role = if is_first_user {
            Role::Admin
        } else {
            Role::Employee
        };

        let user = self
            .db
            .users()
            .insert(&email, &pseudo, &password_hash, role)
            .await?;

        // the entry is one-shot: consumed by the registration it approved
        if !is_first_user {
            self.db.whitelist().delete_by_email(&email).await?;
        }

        info!(user_id = %user.id, role = ?user.role, "account created");

        Ok(user)
    }

    /// Logs the current user out.
    pub fn logout(&self, session: &mut Session) {
        if let Some(id) = session.current_user_id() {
            info!(user_id = %id, "user logged out");
        }
        session.logout();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_db;

    #[tokio::test]
    async fn test_first_registration_is_admin_without_whitelist() {
        let db = test_db().await;
        let auth = AuthService::new(db);

        let user = auth
            .register("admin@x.com", "Admin", "secret1", "secret1")
            .await
            .unwrap();

        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.email, "admin@x.com");
    }

    #[tokio::test]
    async fn test_second_registration_requires_whitelist() {
        let db = test_db().await;
        let auth = AuthService::new(db.clone());

        auth.register("admin@x.com", "Admin", "secret1", "secret1")
            .await
            .unwrap();

        let err = auth
            .register("bob@x.com", "Bob", "secret1", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotWhitelisted));

        // once whitelisted, the same registration succeeds as EMPLOYEE
        db.whitelist().insert("bob@x.com").await.unwrap();
        let bob = auth
            .register("bob@x.com", "Bob", "secret1", "secret1")
            .await
            .unwrap();
        assert_eq!(bob.role, Role::Employee);

        // and the whitelist entry was consumed
        assert!(!db.whitelist().is_whitelisted("bob@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_registration_validation_order() {
        let db = test_db().await;
        let auth = AuthService::new(db);

        // bad email reported first
        let err = auth.register("nope", "A", "short", "x").await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::InvalidFormat { field: "email" })
        ));

        // then pseudo
        let err = auth
            .register("a@x.com", "A", "short", "x")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::TooShort {
                field: "pseudo",
                ..
            })
        ));

        // then password
        let err = auth
            .register("a@x.com", "Alice", "short", "x")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::TooShort {
                field: "password",
                ..
            })
        ));

        // then the confirmation
        let err = auth
            .register("a@x.com", "Alice", "secret1", "secret2")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::PasswordMismatch));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_case_insensitively() {
        let db = test_db().await;
        let auth = AuthService::new(db);

        auth.register("admin@x.com", "Admin", "secret1", "secret1")
            .await
            .unwrap();

        let err = auth
            .register("ADMIN@X.COM", "Copy", "secret1", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::EmailTaken));
    }

    #[tokio::test]
    async fn test_login_success_and_generic_failures() {
        let db = test_db().await;
        let auth = AuthService::new(db);

        auth.register("admin@x.com", "Admin", "secret1", "secret1")
            .await
            .unwrap();

        let mut session = Session::new();

        // wrong password and unknown email yield the same message
        let wrong_password = auth
            .login(&mut session, "admin@x.com", "wrong-password")
            .await
            .unwrap_err();
        let unknown_email = auth
            .login(&mut session, "ghost@x.com", "secret1")
            .await
            .unwrap_err();
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(!session.is_logged_in());

        // correct credentials, case-insensitive email
        let user = auth
            .login(&mut session, "Admin@X.com", "secret1")
            .await
            .unwrap();
        assert!(session.is_logged_in());
        assert_eq!(session.current_user_id(), Some(user.id.as_str()));

        auth.logout(&mut session);
        assert!(!session.is_logged_in());
    }
}
