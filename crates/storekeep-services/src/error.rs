//! # Service Error Types
//!
//! The one error type every service returns, and its classification into
//! the three kinds the presentation layer distinguishes.
//!
//! ## Error Flow
//! ```text
//! ValidationError (core)  ─┐
//! DbError (db, logged)    ─┼─►  ServiceError  ─►  caller sees
//! permission checks       ─┘                      kind + message
//! ```
//!
//! A service call either returns `Ok(payload)` or `Err(ServiceError)`;
//! the error's `Display` text is the user-facing message, surfaced
//! verbatim for validation failures and kept deliberately generic for
//! authentication, permission and storage failures.

use serde::Serialize;
use thiserror::Error;
use tracing::error;

use storekeep_core::ValidationError;
use storekeep_db::DbError;

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification of a [`ServiceError`] for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad input shape/range or a violated business rule; the message
    /// explains exactly what was wrong.
    Validation,

    /// The caller lacks the required role or grant.
    Permission,

    /// The persistence layer failed; the message is a generic
    /// "operation failed".
    Storage,
}

// =============================================================================
// Service Error
// =============================================================================

/// Errors returned by the domain services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input failed a format/length/range rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unknown email or wrong password. One message for both, so a caller
    /// cannot probe which accounts exist.
    #[error("incorrect email or password")]
    InvalidCredentials,

    /// Password confirmation did not match at registration.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// An account already exists with this email.
    #[error("an account already exists with this email")]
    EmailTaken,

    /// Registration attempted with an email that was never pre-approved.
    #[error("this email is not authorized to register, contact an administrator")]
    NotWhitelisted,

    /// The email is already on the whitelist.
    #[error("this email is already whitelisted")]
    AlreadyWhitelisted,

    /// A store with this name already exists (case-insensitively).
    #[error("a store with this name already exists")]
    StoreNameTaken,

    /// Stock decrease larger than the available quantity.
    #[error("insufficient stock, current stock: {available}")]
    InsufficientStock { available: i64 },

    /// Referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The operation requires an authenticated caller.
    #[error("you must be logged in")]
    NotAuthenticated,

    /// The operation is restricted to administrators.
    #[error("only an administrator can perform this operation")]
    AdminOnly,

    /// The caller is neither the owner of the target account nor an
    /// administrator.
    #[error("you do not have permission to perform this operation")]
    Forbidden,

    /// An administrator tried to change their own role.
    #[error("you cannot change your own role")]
    OwnRole,

    /// The caller holds no grant for the store.
    #[error("you do not have access to this store")]
    NoStoreAccess,

    /// Persistence failure. Logged at the boundary; the caller only sees
    /// a generic message.
    #[error("operation failed")]
    Storage(#[source] DbError),

    /// Internal failure (e.g. password hashing), equally generic to the
    /// caller.
    #[error("operation failed")]
    Internal(String),
}

impl ServiceError {
    /// Classifies this error for the presentation layer.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_)
            | ServiceError::InvalidCredentials
            | ServiceError::PasswordMismatch
            | ServiceError::EmailTaken
            | ServiceError::NotWhitelisted
            | ServiceError::AlreadyWhitelisted
            | ServiceError::StoreNameTaken
            | ServiceError::InsufficientStock { .. }
            | ServiceError::NotFound(_) => ErrorKind::Validation,

            ServiceError::NotAuthenticated
            | ServiceError::AdminOnly
            | ServiceError::Forbidden
            | ServiceError::OwnRole
            | ServiceError::NoStoreAccess => ErrorKind::Permission,

            ServiceError::Storage(_) | ServiceError::Internal(_) => ErrorKind::Storage,
        }
    }
}

/// Persistence failures are logged here, at the gateway boundary, and
/// reach the caller as the generic storage outcome.
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        error!(error = %err, "persistence operation failed");
        ServiceError::Storage(err)
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ServiceError::InvalidCredentials.to_string(),
            "incorrect email or password"
        );
        assert_eq!(
            ServiceError::InsufficientStock { available: 10 }.to_string(),
            "insufficient stock, current stock: 10"
        );
        assert_eq!(ServiceError::NotFound("item").to_string(), "item not found");
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            ServiceError::InvalidCredentials.kind(),
            ErrorKind::Validation
        );
        assert_eq!(ServiceError::AdminOnly.kind(), ErrorKind::Permission);
        assert_eq!(
            ServiceError::Internal("boom".to_string()).kind(),
            ErrorKind::Storage
        );
        assert_eq!(
            ServiceError::Validation(ValidationError::Required { field: "email" }).kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_storage_message_is_generic() {
        let err: ServiceError = DbError::Internal("disk on fire".to_string()).into();
        assert_eq!(err.to_string(), "operation failed");
    }
}
