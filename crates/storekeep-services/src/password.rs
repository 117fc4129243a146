//! # Password Hashing
//!
//! Salted, slow, adaptive hashing of account passwords with argon2.
//!
//! Two hashes of the same password differ (random salt per call) and both
//! verify. Verification never fails with an error: a malformed digest is
//! simply not a match.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

use crate::error::{ServiceError, ServiceResult};

/// Hashes a password for storage.
///
/// Each call draws a fresh random salt, so the digest is different every
/// time. The digest is self-describing (algorithm, parameters, salt), so
/// [`verify_password`] needs nothing else.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ServiceError::Internal(format!("failed to hash password: {e}")))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored digest.
///
/// Returns `false` for a wrong password AND for a digest that doesn't
/// parse; it never errors.
pub fn verify_password(password: &str, digest: &str) -> bool {
    let parsed_hash = match PasswordHash::new(digest) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let digest = hash_password("secret1").unwrap();

        assert!(verify_password("secret1", &digest));
        assert!(!verify_password("secret2", &digest));
        assert_ne!(digest, "secret1");
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let first = hash_password("secret1").unwrap();
        let second = hash_password("secret1").unwrap();

        // distinct salts, distinct digests, both verify
        assert_ne!(first, second);
        assert!(verify_password("secret1", &first));
        assert!(verify_password("secret1", &second));
    }

    #[test]
    fn test_malformed_digest_never_panics() {
        assert!(!verify_password("secret1", "not-a-valid-digest"));
        assert!(!verify_password("secret1", ""));
        assert!(!verify_password("secret1", "$argon2id$v=19$garbage"));
    }
}
