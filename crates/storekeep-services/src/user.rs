//! # User Service
//!
//! Account management: listing, profile updates, role changes, deletion.
//!
//! Read paths always return users with the password hash masked; a real
//! digest never leaves the service layer.

use tracing::info;

use storekeep_core::{validation, Role, User};
use storekeep_db::{Database, DbError};

use crate::error::{ServiceError, ServiceResult};
use crate::password;
use crate::session::Session;

/// User management service.
#[derive(Debug, Clone)]
pub struct UserService {
    db: Database,
}

impl UserService {
    /// Creates a new UserService.
    pub fn new(db: Database) -> Self {
        UserService { db }
    }

    /// Lists all users, password hashes masked.
    pub async fn all_users(&self) -> ServiceResult<Vec<User>> {
        let users = self.db.users().all().await?;
        Ok(users.iter().map(User::masked).collect())
    }

    /// Gets a user by ID, password hash masked.
    pub async fn user_by_id(&self, id: &str) -> ServiceResult<Option<User>> {
        let user = self.db.users().find_by_id(id).await?;
        Ok(user.map(|u| u.masked()))
    }

    /// Updates a user's pseudo, email and (optionally) password.
    ///
    /// ## Permissions
    /// Only the user themselves or an administrator.
    ///
    /// ## Rules
    /// - pseudo and email re-validated
    /// - the new email may not belong to a *different* account
    /// - an empty `new_password` means "leave the password unchanged"
    /// - editing yourself refreshes the session user
    pub async fn update_user(
        &self,
        session: &mut Session,
        user_id: &str,
        pseudo: &str,
        email: &str,
        new_password: &str,
    ) -> ServiceResult<User> {
        let (caller_id, caller_is_admin) = {
            let caller = session.require_user()?;
            (caller.id.clone(), caller.is_admin())
        };

        if caller_id != user_id && !caller_is_admin {
            return Err(ServiceError::Forbidden);
        }

        let mut user = self
            .db
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::NotFound("user"))?;

        let pseudo = validation::validate_pseudo(pseudo)?;
        let email = validation::validate_email(email)?;

        if let Some(existing) = self.db.users().find_by_email(&email).await? {
            if existing.id != user_id {
                return Err(ServiceError::EmailTaken);
            }
        }

        user.pseudo = pseudo;
        user.email = email;

        if !new_password.trim().is_empty() {
            validation::validate_password(new_password)?;
            user.password_hash = password::hash_password(new_password)?;
        }

        self.db.users().update(&user).await?;
        info!(user_id = %user.id, "user updated");

        if caller_id == user_id {
            session.set_current_user(user.clone());
        }

        Ok(user.masked())
    }

    /// Changes a user's role.
    ///
    /// ## Permissions
    /// Administrators only, and never on their own account - an admin
    /// cannot demote themselves out of the last admin seat by accident.
    pub async fn update_role(
        &self,
        session: &Session,
        user_id: &str,
        role: Role,
    ) -> ServiceResult<User> {
        let caller = session.require_admin()?;

        if caller.id == user_id {
            return Err(ServiceError::OwnRole);
        }

        let mut user = self
            .db
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::NotFound("user"))?;

        user.role = role;
        self.db.users().update(&user).await?;
        info!(user_id = %user.id, role = ?role, "role updated");

        Ok(user.masked())
    }

    /// Deletes a user account.
    ///
    /// ## Permissions
    /// Only the user themselves or an administrator.
    ///
    /// Store-access grants are removed first; deleting your own account
    /// also logs you out.
    pub async fn delete_user(&self, session: &mut Session, user_id: &str) -> ServiceResult<()> {
        let (caller_id, caller_is_admin) = {
            let caller = session.require_user()?;
            (caller.id.clone(), caller.is_admin())
        };

        if caller_id != user_id && !caller_is_admin {
            return Err(ServiceError::Forbidden);
        }

        self.db.store_access().revoke_all_for_user(user_id).await?;

        self.db.users().delete(user_id).await.map_err(|e| match e {
            DbError::NotFound { .. } => ServiceError::NotFound("user"),
            other => other.into(),
        })?;

        info!(user_id = %user_id, "user deleted");

        if caller_id == user_id {
            session.logout();
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{login, register_admin, register_employee, test_db};
    use storekeep_core::MASKED_PASSWORD;

    #[tokio::test]
    async fn test_read_paths_mask_the_hash() {
        let db = test_db().await;
        let (_, admin) = register_admin(&db).await;
        let users = UserService::new(db);

        let listed = users.all_users().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].password_hash, MASKED_PASSWORD);

        let fetched = users.user_by_id(&admin.id).await.unwrap().unwrap();
        assert_eq!(fetched.password_hash, MASKED_PASSWORD);

        // the JSON the presentation layer sees carries the placeholder too
        let json = serde_json::to_value(&fetched).unwrap();
        assert_eq!(json["password_hash"], MASKED_PASSWORD);
    }

    #[tokio::test]
    async fn test_employee_cannot_update_someone_else() {
        let db = test_db().await;
        let (_, admin) = register_admin(&db).await;
        let bob = register_employee(&db, "bob@x.com", "Bob").await;
        let users = UserService::new(db.clone());

        let mut bob_session = login(&db, "bob@x.com").await;
        let err = users
            .update_user(&mut bob_session, &admin.id, "Hacked", "admin@x.com", "")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden));

        // but bob can update himself, and the session follows
        let updated = users
            .update_user(&mut bob_session, &bob.id, "Bobby", "bobby@x.com", "")
            .await
            .unwrap();
        assert_eq!(updated.pseudo, "Bobby");
        assert_eq!(
            bob_session.current_user().unwrap().email,
            "bobby@x.com".to_string()
        );
    }

    #[tokio::test]
    async fn test_update_rejects_email_of_another_account() {
        let db = test_db().await;
        let (mut admin_session, admin) = register_admin(&db).await;
        register_employee(&db, "bob@x.com", "Bob").await;
        let users = UserService::new(db);

        let err = users
            .update_user(&mut admin_session, &admin.id, "Admin", "BOB@x.com", "")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::EmailTaken));

        // keeping your own email is not a collision
        users
            .update_user(&mut admin_session, &admin.id, "Admin", "admin@x.com", "")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_password_leaves_credentials_unchanged() {
        let db = test_db().await;
        let (mut admin_session, admin) = register_admin(&db).await;
        let users = UserService::new(db.clone());

        users
            .update_user(&mut admin_session, &admin.id, "Admin", "admin@x.com", "")
            .await
            .unwrap();

        // still logs in with the original password
        login(&db, "admin@x.com").await;

        // a non-empty password is validated and replaced
        let err = users
            .update_user(&mut admin_session, &admin.id, "Admin", "admin@x.com", "short")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        users
            .update_user(
                &mut admin_session,
                &admin.id,
                "Admin",
                "admin@x.com",
                "newsecret",
            )
            .await
            .unwrap();
        let stored = db
            .users()
            .find_by_id(&admin.id)
            .await
            .unwrap()
            .unwrap();
        assert!(crate::password::verify_password("newsecret", &stored.password_hash));
    }

    #[tokio::test]
    async fn test_admin_cannot_change_own_role() {
        let db = test_db().await;
        let (admin_session, admin) = register_admin(&db).await;
        let bob = register_employee(&db, "bob@x.com", "Bob").await;
        let users = UserService::new(db);

        let err = users
            .update_role(&admin_session, &admin.id, Role::Employee)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::OwnRole));

        let promoted = users
            .update_role(&admin_session, &bob.id, Role::Admin)
            .await
            .unwrap();
        assert_eq!(promoted.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_role_change_is_admin_only() {
        let db = test_db().await;
        let (_, admin) = register_admin(&db).await;
        register_employee(&db, "bob@x.com", "Bob").await;
        let users = UserService::new(db.clone());

        let bob_session = login(&db, "bob@x.com").await;
        let err = users
            .update_role(&bob_session, &admin.id, Role::Employee)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AdminOnly));
    }

    #[tokio::test]
    async fn test_deleting_self_revokes_grants_and_logs_out() {
        let db = test_db().await;
        let (admin_session, _) = register_admin(&db).await;
        let bob = register_employee(&db, "bob@x.com", "Bob").await;
        let users = UserService::new(db.clone());

        // give bob a grant so the cascade has something to remove
        let store = db.stores().insert("Main").await.unwrap();
        db.store_access().grant(&bob.id, &store.id).await.unwrap();
        drop(admin_session);

        let mut bob_session = login(&db, "bob@x.com").await;
        users.delete_user(&mut bob_session, &bob.id).await.unwrap();

        assert!(!bob_session.is_logged_in());
        assert!(!db
            .store_access()
            .has_access(&bob.id, &store.id)
            .await
            .unwrap());
        assert!(db.users().find_by_id(&bob.id).await.unwrap().is_none());
    }
}
