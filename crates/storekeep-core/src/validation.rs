//! # Validation Module
//!
//! Input validation rules for storekeep.
//!
//! ## Validation Strategy
//! ```text
//! Layer 1: Presentation        - immediate feedback, not trusted
//! Layer 2: THIS MODULE         - format/length/range rules on raw input
//! Layer 3: Database            - NOT NULL / UNIQUE / CHECK constraints
//! ```
//!
//! Every function is pure: it takes the raw string the user typed and
//! either returns the normalized value (trimmed, lowercased for emails,
//! parsed for numbers) or a [`ValidationError`] whose message is shown to
//! the user as-is.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::{MIN_PASSWORD_LENGTH, MIN_PSEUDO_LENGTH, MIN_STORE_NAME_LENGTH};

/// `local@domain.tld` with a 2+ letter TLD.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

// =============================================================================
// String Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must match `local@domain.tld`
///
/// ## Returns
/// The normalized email: trimmed and lowercased. All storage and lookups
/// use the normalized form, which is what makes emails unique
/// case-insensitively.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required { field: "email" });
    }

    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::InvalidFormat { field: "email" });
    }

    Ok(email.to_lowercase())
}

/// Validates a password.
///
/// ## Rules
/// - Must not be empty
/// - Must be at least [`MIN_PASSWORD_LENGTH`] characters
///
/// Passwords are never trimmed or otherwise normalized.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required { field: "password" });
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password",
            min: MIN_PASSWORD_LENGTH,
        });
    }

    Ok(())
}

/// Validates a pseudo (display name).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at least [`MIN_PSEUDO_LENGTH`] characters after trimming
///
/// ## Returns
/// The trimmed pseudo.
pub fn validate_pseudo(pseudo: &str) -> ValidationResult<String> {
    let pseudo = pseudo.trim();

    if pseudo.is_empty() {
        return Err(ValidationError::Required { field: "pseudo" });
    }

    if pseudo.chars().count() < MIN_PSEUDO_LENGTH {
        return Err(ValidationError::TooShort {
            field: "pseudo",
            min: MIN_PSEUDO_LENGTH,
        });
    }

    Ok(pseudo.to_string())
}

/// Validates a store name.
///
/// Same shape as [`validate_pseudo`]: non-empty, at least
/// [`MIN_STORE_NAME_LENGTH`] characters, returned trimmed.
pub fn validate_store_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field: "store name" });
    }

    if name.chars().count() < MIN_STORE_NAME_LENGTH {
        return Err(ValidationError::TooShort {
            field: "store name",
            min: MIN_STORE_NAME_LENGTH,
        });
    }

    Ok(name.to_string())
}

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty after trimming
///
/// ## Returns
/// The trimmed name.
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field: "item name" });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a raw price string.
///
/// ## Rules
/// - Must not be empty
/// - Must parse as a decimal amount (`"9"`, `"9.5"`, `"9.99"`)
/// - Must not be negative (zero is allowed: free items exist)
///
/// ## Returns
/// The parsed [`Money`] value.
pub fn validate_price(price: &str) -> ValidationResult<Money> {
    let price = price.trim();

    if price.is_empty() {
        return Err(ValidationError::Required { field: "price" });
    }

    let amount: Money = price
        .parse()
        .map_err(|_| ValidationError::InvalidNumber { field: "price" })?;

    if amount.is_negative() {
        return Err(ValidationError::Negative { field: "price" });
    }

    Ok(amount)
}

/// Validates a raw quantity string.
///
/// ## Rules
/// - Must not be empty
/// - Must parse as an integer
/// - Must not be negative (zero is a valid stock level)
///
/// ## Returns
/// The parsed quantity.
pub fn validate_quantity(quantity: &str) -> ValidationResult<i64> {
    let quantity = quantity.trim();

    if quantity.is_empty() {
        return Err(ValidationError::Required { field: "quantity" });
    }

    let quantity: i64 = quantity
        .parse()
        .map_err(|_| ValidationError::InvalidNumber { field: "quantity" })?;

    if quantity < 0 {
        return Err(ValidationError::Negative { field: "quantity" });
    }

    Ok(quantity)
}

/// Validates a stock adjustment amount.
///
/// Increase/decrease operations move stock by a strictly positive amount;
/// zero and negative adjustments are rejected.
pub fn validate_stock_amount(amount: i64) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::MustBePositive { field: "amount" });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
