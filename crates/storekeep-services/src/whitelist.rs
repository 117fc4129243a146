//! # Whitelist Service
//!
//! Administration of the registration pre-approval list.
//!
//! Registration itself consumes entries (see the auth service); this
//! service is the admin-facing CRUD around them.

use tracing::info;

use storekeep_core::{validation, WhitelistEntry};
use storekeep_db::Database;

use crate::error::{ServiceError, ServiceResult};
use crate::session::Session;

/// Whitelist management service.
#[derive(Debug, Clone)]
pub struct WhitelistService {
    db: Database,
}

impl WhitelistService {
    /// Creates a new WhitelistService.
    pub fn new(db: Database) -> Self {
        WhitelistService { db }
    }

    /// Adds an email to the whitelist.
    ///
    /// ## Permissions
    /// Administrators only.
    ///
    /// ## Rules
    /// - rejected if already whitelisted
    /// - rejected if an account with this email already exists (the
    ///   whitelist is for accounts that don't exist yet)
    pub async fn add_email(&self, session: &Session, email: &str) -> ServiceResult<WhitelistEntry> {
        session.require_admin()?;

        let email = validation::validate_email(email)?;

        if self.db.whitelist().is_whitelisted(&email).await? {
            return Err(ServiceError::AlreadyWhitelisted);
        }

        if self.db.users().email_exists(&email).await? {
            return Err(ServiceError::EmailTaken);
        }

        let entry = self.db.whitelist().insert(&email).await?;
        info!(email = %entry.email, "email whitelisted");

        Ok(entry)
    }

    /// Removes a whitelist entry by ID.
    ///
    /// ## Permissions
    /// Administrators only.
    pub async fn remove_email(&self, session: &Session, id: &str) -> ServiceResult<()> {
        session.require_admin()?;

        if self.db.whitelist().find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound("whitelist entry"));
        }

        self.db.whitelist().delete(id).await?;
        info!(entry_id = %id, "whitelist entry removed");

        Ok(())
    }

    /// Lists all whitelist entries.
    pub async fn entries(&self) -> ServiceResult<Vec<WhitelistEntry>> {
        Ok(self.db.whitelist().all().await?)
    }

    /// Checks whether an email is whitelisted.
    pub async fn is_whitelisted(&self, email: &str) -> ServiceResult<bool> {
        Ok(self.db.whitelist().is_whitelisted(email).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{login, register_admin, register_employee, test_db};

    #[tokio::test]
    async fn test_add_email_rules() {
        let db = test_db().await;
        let (admin_session, _) = register_admin(&db).await;
        let whitelist = WhitelistService::new(db);

        let entry = whitelist
            .add_email(&admin_session, " Bob@X.com ")
            .await
            .unwrap();
        assert_eq!(entry.email, "bob@x.com");

        // already whitelisted
        let err = whitelist
            .add_email(&admin_session, "bob@x.com")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyWhitelisted));

        // already an account
        let err = whitelist
            .add_email(&admin_session, "admin@x.com")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::EmailTaken));

        // bad format
        let err = whitelist
            .add_email(&admin_session, "not-an-email")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_whitelist_is_admin_only() {
        let db = test_db().await;
        let (_, _) = register_admin(&db).await;
        register_employee(&db, "bob@x.com", "Bob").await;
        let whitelist = WhitelistService::new(db.clone());

        let bob_session = login(&db, "bob@x.com").await;
        let err = whitelist
            .add_email(&bob_session, "carol@x.com")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AdminOnly));

        let err = whitelist
            .remove_email(&bob_session, "some-id")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AdminOnly));
    }

    #[tokio::test]
    async fn test_remove_and_list_entries() {
        let db = test_db().await;
        let (admin_session, _) = register_admin(&db).await;
        let whitelist = WhitelistService::new(db);

        let entry = whitelist
            .add_email(&admin_session, "bob@x.com")
            .await
            .unwrap();
        whitelist
            .add_email(&admin_session, "carol@x.com")
            .await
            .unwrap();

        assert_eq!(whitelist.entries().await.unwrap().len(), 2);
        assert!(whitelist.is_whitelisted("BOB@x.com").await.unwrap());

        whitelist
            .remove_email(&admin_session, &entry.id)
            .await
            .unwrap();
        assert!(!whitelist.is_whitelisted("bob@x.com").await.unwrap());

        let err = whitelist
            .remove_email(&admin_session, &entry.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("whitelist entry")));
    }
}
