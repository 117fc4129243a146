//! # Session
//!
//! The authenticated-caller context passed into every service call.
//!
//! This is an owned value, not a process-wide singleton: a desktop UI
//! keeps one for its window, a server would create one per
//! request/connection. That keeps services free of shared mutable state
//! and lets tests run in parallel.

use storekeep_core::User;

use crate::error::{ServiceError, ServiceResult};

/// Holds at most one authenticated user.
#[derive(Debug, Default)]
pub struct Session {
    current_user: Option<User>,
}

impl Session {
    /// Creates an anonymous session.
    pub fn new() -> Self {
        Session { current_user: None }
    }

    /// Sets the authenticated user (on login, or after a self-update).
    pub fn set_current_user(&mut self, user: User) {
        self.current_user = Some(user);
    }

    /// Returns the authenticated user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Returns the authenticated user's ID, if any.
    pub fn current_user_id(&self) -> Option<&str> {
        self.current_user.as_ref().map(|u| u.id.as_str())
    }

    /// Checks whether a user is logged in.
    pub fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    /// Checks whether the logged-in user is an administrator.
    pub fn is_admin(&self) -> bool {
        self.current_user.as_ref().is_some_and(User::is_admin)
    }

    /// Clears the session.
    pub fn logout(&mut self) {
        self.current_user = None;
    }

    /// Returns the authenticated user or a permission error.
    pub fn require_user(&self) -> ServiceResult<&User> {
        self.current_user
            .as_ref()
            .ok_or(ServiceError::NotAuthenticated)
    }

    /// Returns the authenticated user if they are an administrator, or a
    /// permission error.
    pub fn require_admin(&self) -> ServiceResult<&User> {
        let user = self.require_user()?;
        if !user.is_admin() {
            return Err(ServiceError::AdminOnly);
        }
        Ok(user)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use storekeep_core::Role;

    fn user(role: Role) -> User {
        User {
            id: "u-1".to_string(),
            email: "alice@example.com".to_string(),
            pseudo: "Alice".to_string(),
            password_hash: "hash".to_string(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_anonymous_session() {
        let session = Session::new();

        assert!(!session.is_logged_in());
        assert!(!session.is_admin());
        assert_eq!(session.current_user_id(), None);
        assert!(session.require_user().is_err());
        assert!(session.require_admin().is_err());
    }

    #[test]
    fn test_login_logout_lifecycle() {
        let mut session = Session::new();
        session.set_current_user(user(Role::Admin));

        assert!(session.is_logged_in());
        assert!(session.is_admin());
        assert_eq!(session.current_user_id(), Some("u-1"));
        assert!(session.require_admin().is_ok());

        session.logout();
        assert!(!session.is_logged_in());
        assert_eq!(session.current_user_id(), None);
    }

    #[test]
    fn test_employee_is_not_admin() {
        let mut session = Session::new();
        session.set_current_user(user(Role::Employee));

        assert!(session.is_logged_in());
        assert!(!session.is_admin());
        assert!(session.require_user().is_ok());
        assert!(matches!(
            session.require_admin(),
            Err(ServiceError::AdminOnly)
        ));
    }
}
