//! # Store Service
//!
//! Store lifecycle and employee access grants.
//!
//! Administrators see and control everything; employees only see the
//! stores an admin granted them.

use tracing::info;

use storekeep_core::{validation, Store, User};
use storekeep_db::Database;

use crate::error::{ServiceError, ServiceResult};
use crate::session::Session;

/// Store management service.
#[derive(Debug, Clone)]
pub struct StoreService {
    db: Database,
}

impl StoreService {
    /// Creates a new StoreService.
    pub fn new(db: Database) -> Self {
        StoreService { db }
    }

    /// Creates a store.
    ///
    /// ## Permissions
    /// Administrators only. Store names are unique case-insensitively.
    pub async fn create_store(&self, session: &Session, name: &str) -> ServiceResult<Store> {
        session.require_admin()?;

        let name = validation::validate_store_name(name)?;

        if self.db.stores().name_exists(&name).await? {
            return Err(ServiceError::StoreNameTaken);
        }

        let store = self.db.stores().insert(&name).await?;
        info!(store_id = %store.id, name = %store.name, "store created");

        Ok(store)
    }

    /// Lists the stores the caller can work with.
    ///
    /// Administrators get every store; employees get the stores they hold
    /// a grant for; anonymous callers get nothing.
    pub async fn accessible_stores(&self, session: &Session) -> ServiceResult<Vec<Store>> {
        let user = match session.current_user() {
            Some(user) => user,
            None => return Ok(Vec::new()),
        };

        if user.is_admin() {
            return Ok(self.db.stores().all().await?);
        }

        Ok(self.db.store_access().stores_for_user(&user.id).await?)
    }

    /// Gets a store by ID.
    pub async fn store_by_id(&self, id: &str) -> ServiceResult<Option<Store>> {
        Ok(self.db.stores().find_by_id(id).await?)
    }

    /// Checks whether the caller can access a store.
    ///
    /// Administrators always can; employees need a grant; anonymous
    /// callers never can.
    pub async fn has_access(&self, session: &Session, store_id: &str) -> ServiceResult<bool> {
        let user = match session.current_user() {
            Some(user) => user,
            None => return Ok(false),
        };

        if user.is_admin() {
            return Ok(true);
        }

        Ok(self.db.store_access().has_access(&user.id, store_id).await?)
    }

    /// Deletes a store along with its items and access grants.
    ///
    /// ## Permissions
    /// Administrators only.
    ///
    /// The order is deliberate: items first, then grants, then the store
    /// row itself.
    pub async fn delete_store(&self, session: &Session, store_id: &str) -> ServiceResult<()> {
        session.require_admin()?;

        if self.db.stores().find_by_id(store_id).await?.is_none() {
            return Err(ServiceError::NotFound("store"));
        }

        self.db.items().delete_by_store(store_id).await?;
        self.db.store_access().revoke_all_for_store(store_id).await?;
        self.db.stores().delete(store_id).await?;

        info!(store_id = %store_id, "store deleted");

        Ok(())
    }

    /// Grants an employee access to a store.
    ///
    /// ## Permissions
    /// Administrators only. Granting an existing access is a no-op
    /// success.
    pub async fn add_employee(
        &self,
        session: &Session,
        user_id: &str,
        store_id: &str,
    ) -> ServiceResult<()> {
        session.require_admin()?;

        if self.db.users().find_by_id(user_id).await?.is_none() {
            return Err(ServiceError::NotFound("user"));
        }
        if self.db.stores().find_by_id(store_id).await?.is_none() {
            return Err(ServiceError::NotFound("store"));
        }

        self.db.store_access().grant(user_id, store_id).await?;
        info!(user_id = %user_id, store_id = %store_id, "store access granted");

        Ok(())
    }

    /// Revokes an employee's access to a store.
    ///
    /// ## Permissions
    /// Administrators only.
    pub async fn remove_employee(
        &self,
        session: &Session,
        user_id: &str,
        store_id: &str,
    ) -> ServiceResult<()> {
        session.require_admin()?;

        if !self.db.store_access().revoke(user_id, store_id).await? {
            return Err(ServiceError::NotFound("access grant"));
        }

        info!(user_id = %user_id, store_id = %store_id, "store access revoked");

        Ok(())
    }

    /// Lists the employees holding a grant for a store, password hashes
    /// masked.
    pub async fn store_employees(&self, store_id: &str) -> ServiceResult<Vec<User>> {
        let users = self.db.store_access().users_for_store(store_id).await?;
        Ok(users.iter().map(User::masked).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
