//! # Error Types
//!
//! Validation error types for storekeep-core.
//!
//! ## Error Flow
//! ```text
//! ValidationError (this file)  →  ServiceError (storekeep-services)  →  caller
//! DbError (storekeep-db)       →  ServiceError (generic "operation failed")
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never bare Strings
//! 3. Each variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when raw user input doesn't meet the format/length/range
/// rules. The message is surfaced verbatim to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    /// Invalid format (e.g. malformed email address).
    #[error("{field} has an invalid format")]
    InvalidFormat { field: &'static str },

    /// Value did not parse as a number of the expected shape.
    #[error("{field} must be a valid number")]
    InvalidNumber { field: &'static str },

    /// Numeric value may not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    /// Numeric value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
