//! # Inventory Service
//!
//! Item lifecycle (admin) and stock adjustments (anyone with store
//! access).
//!
//! ## Access Model
//! ```text
//! create/update/delete item      ADMIN only
//! list items, adjust stock       ADMIN, or employee granted the store
//! ```
//!
//! Listing a store you cannot access returns an empty list rather than an
//! error (soft deny); stock adjustments on it are refused outright.
//!
//! Stock moves through single-statement conditional updates in the
//! repository, so a decrease can never take the quantity below zero, even
//! with concurrent callers.

use tracing::info;

use storekeep_core::{validation, Item};
use storekeep_db::{Database, DbError};

use crate::error::{ServiceError, ServiceResult};
use crate::session::Session;

/// Inventory management service.
#[derive(Debug, Clone)]
pub struct InventoryService {
    db: Database,
}

impl InventoryService {
    /// Creates a new InventoryService.
    pub fn new(db: Database) -> Self {
        InventoryService { db }
    }

    /// Checks whether the session user can access a store.
    async fn has_store_access(&self, session: &Session, store_id: &str) -> ServiceResult<bool> {
        let user = match session.current_user() {
            Some(user) => user,
            None => return Ok(false),
        };

        if user.is_admin() {
            return Ok(true);
        }

        Ok(self.db.store_access().has_access(&user.id, store_id).await?)
    }

    /// Creates an item in a store.
    ///
    /// ## Permissions
    /// Administrators only.
    ///
    /// Price and quantity arrive as the raw strings the user typed and go
    /// through the validators (`"9.99"`-style price, non-negative integer
    /// quantity).
    pub async fn create_item(
        &self,
        session: &Session,
        name: &str,
        price: &str,
        quantity: &str,
        store_id: &str,
    ) -> ServiceResult<Item> {
        session.require_admin()?;

        let name = validation::validate_item_name(name)?;
        let price = validation::validate_price(price)?;
        let quantity = validation::validate_quantity(quantity)?;

        if self.db.stores().find_by_id(store_id).await?.is_none() {
            return Err(ServiceError::NotFound("store"));
        }

        let item = self
            .db
            .items()
            .insert(&name, price.cents(), quantity, store_id)
            .await?;

        info!(item_id = %item.id, store_id = %store_id, "item created");

        Ok(item)
    }

    /// Lists a store's items.
    ///
    /// Soft deny: a caller without access to the store gets an empty
    /// list, not an error.
    pub async fn items_by_store(
        &self,
        session: &Session,
        store_id: &str,
    ) -> ServiceResult<Vec<Item>> {
        if !self.has_store_access(session, store_id).await? {
            return Ok(Vec::new());
        }

        Ok(self.db.items().find_by_store(store_id).await?)
    }

    /// Gets an item by ID.
    ///
    /// Returns `None` when the item doesn't exist or the caller cannot
    /// access its store.
    pub async fn item_by_id(&self, session: &Session, item_id: &str) -> ServiceResult<Option<Item>> {
        let item = match self.db.items().find_by_id(item_id).await? {
            Some(item) => item,
            None => return Ok(None),
        };

        if !self.has_store_access(session, &item.store_id).await? {
            return Ok(None);
        }

        Ok(Some(item))
    }

    /// Updates an item's name, price and quantity.
    ///
    /// ## Permissions
    /// Administrators only.
    pub async fn update_item(
        &self,
        session: &Session,
        item_id: &str,
        name: &str,
        price: &str,
        quantity: &str,
    ) -> ServiceResult<Item> {
        session.require_admin()?;

        let mut item = self
            .db
            .items()
            .find_by_id(item_id)
            .await?
            .ok_or(ServiceError::NotFound("item"))?;

        item.name = validation::validate_item_name(name)?;
        item.price_cents = validation::validate_price(price)?.cents();
        item.quantity = validation::validate_quantity(quantity)?;

        self.db.items().update(&item).await?;
        info!(item_id = %item.id, "item updated");

        Ok(item)
    }

    /// Deletes an item.
    ///
    /// ## Permissions
    /// Administrators only.
    pub async fn delete_item(&self, session: &Session, item_id: &str) -> ServiceResult<()> {
        session.require_admin()?;

        self.db.items().delete(item_id).await.map_err(|e| match e {
            DbError::NotFound { .. } => ServiceError::NotFound("item"),
            other => other.into(),
        })?;

        info!(item_id = %item_id, "item deleted");

        Ok(())
    }

    /// Increases an item's stock.
    ///
    /// ## Permissions
    /// Anyone with access to the owning store. The amount must be
    /// strictly positive.
    pub async fn increase_stock(
        &self,
        session: &Session,
        item_id: &str,
        amount: i64,
    ) -> ServiceResult<Item> {
        let item = self
            .db
            .items()
            .find_by_id(item_id)
            .await?
            .ok_or(ServiceError::NotFound("item"))?;

        if !self.has_store_access(session, &item.store_id).await? {
            return Err(ServiceError::NoStoreAccess);
        }

        validation::validate_stock_amount(amount)?;

        self.db.items().increase_quantity(item_id, amount).await?;

        info!(item_id = %item_id, amount = %amount, "stock increased");

        self.db
            .items()
            .find_by_id(item_id)
            .await?
            .ok_or(ServiceError::NotFound("item"))
    }

    /// Decreases an item's stock.
    ///
    /// ## Permissions
    /// Anyone with access to the owning store. The amount must be
    /// strictly positive and at most the current quantity; on refusal the
    /// error reports the current stock and nothing changes.
    pub async fn decrease_stock(
        &self,
        session: &Session,
        item_id: &str,
        amount: i64,
    ) -> ServiceResult<Item> {
        let item = self
            .db
            .items()
            .find_by_id(item_id)
            .await?
            .ok_or(ServiceError::NotFound("item"))?;

        if !self.has_store_access(session, &item.store_id).await? {
            return Err(ServiceError::NoStoreAccess);
        }

        validation::validate_stock_amount(amount)?;

        // conditional update: refused atomically when stock is short
        if !self.db.items().decrease_quantity(item_id, amount).await? {
            let current = self
                .db
                .items()
                .find_by_id(item_id)
                .await?
                .ok_or(ServiceError::NotFound("item"))?;
            return Err(ServiceError::InsufficientStock {
                available: current.quantity,
            });
        }

        info!(item_id = %item_id, amount = %amount, "stock decreased");

        self.db
            .items()
            .find_by_id(item_id)
            .await?
            .ok_or(ServiceError::NotFound("item"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
