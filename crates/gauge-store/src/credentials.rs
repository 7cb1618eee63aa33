//! Password credential hashing (Argon2id, PHC string format).

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::error::StoreError;

const SALT_LEN: usize = 16;

/// Hash a plain-text password into an Argon2id PHC string.
///
/// # Errors
///
/// Returns [`StoreError::Credential`] if the OS random source or the hasher fails.
pub fn hash_password(password: &str) -> Result<String, StoreError> {
    let mut salt_bytes = [0u8; SALT_LEN];
    getrandom::fill(&mut salt_bytes)
        .map_err(|e| StoreError::Credential(format!("random salt: {e}")))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| StoreError::Credential(format!("salt encoding: {e}")))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::Credential(format!("hash: {e}")))
}

/// Check a plain-text password against a stored PHC string.
///
/// A mismatch is `Ok(false)`; only an unparsable stored hash is an error.
///
/// # Errors
///
/// Returns [`StoreError::Credential`] if `stored` is not a valid PHC string.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, StoreError> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| StoreError::Credential(format!("stored hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_argon2id_and_verifies() {
        let hash = hash_password("hunter2").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("Hunter2", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_stored_hash_is_an_error() {
        assert!(matches!(
            verify_password("x", "plain-text"),
            Err(StoreError::Credential(_))
        ));
    }
}
