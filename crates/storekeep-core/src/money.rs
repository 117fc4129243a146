//! # Money Module
//!
//! Provides the `Money` type for handling item prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! In floating point:  0.1 + 0.2 = 0.30000000000000004
//! In integer cents:   10 + 20   = 30
//! ```
//! Every price in the system is an i64 number of cents. The database,
//! validation and services all use cents; only display formatting converts
//! back to the decimal form.
//!
//! ## Usage
//! ```rust
//! use storekeep_core::money::Money;
//!
//! let price: Money = "10.99".parse().unwrap();
//! assert_eq!(price.cents(), 1099);
//! assert_eq!(price.to_string(), "10.99");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Signed so that arithmetic intermediates can go negative; validation
/// rejects negative prices before they reach persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use storekeep_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the major unit portion (e.g. dollars).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Error returned when a string does not parse as a money amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid money amount")]
pub struct ParseMoneyError;

impl FromStr for Money {
    type Err = ParseMoneyError;

    /// Parses decimal strings such as `"10"`, `"10.9"` or `"10.99"`.
    ///
    /// At most two fraction digits are accepted; a lone fraction digit
    /// means tens of cents (`"9.5"` is 950 cents). Anything else - signs
    /// in the wrong place, letters, more than two decimals - is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (major_str, minor_str) = match digits.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (digits, None),
        };

        if major_str.is_empty() && minor_str.map_or(true, str::is_empty) {
            return Err(ParseMoneyError);
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            if !major_str.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseMoneyError);
            }
            major_str.parse().map_err(|_| ParseMoneyError)?
        };

        let minor: i64 = match minor_str {
            None => 0,
            Some(m) => {
                if m.is_empty() || m.len() > 2 || !m.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ParseMoneyError);
                }
                let parsed: i64 = m.parse().map_err(|_| ParseMoneyError)?;
                // "9.5" means 9 and 50 cents, not 9 and 5 cents
                if m.len() == 1 {
                    parsed * 10
                } else {
                    parsed
                }
            }
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or(ParseMoneyError)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_amount() {
        assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("0".parse::<Money>().unwrap().cents(), 0);
    }

    #[test]
    fn test_parse_decimal_amount() {
        assert_eq!("9.99".parse::<Money>().unwrap().cents(), 999);
        assert_eq!("9.5".parse::<Money>().unwrap().cents(), 950);
        assert_eq!(".99".parse::<Money>().unwrap().cents(), 99);
        assert_eq!(" 12.00 ".parse::<Money>().unwrap().cents(), 1200);
    }

    #[test]
    fn test_parse_negative_amount() {
        let parsed = "-5.50".parse::<Money>().unwrap();
        assert_eq!(parsed.cents(), -550);
        assert!(parsed.is_negative());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("9.999".parse::<Money>().is_err());
        assert!("9.".parse::<Money>().is_err());
        assert!("9,99".parse::<Money>().is_err());
        assert!("1e3".parse::<Money>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(950).to_string(), "9.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }
}
