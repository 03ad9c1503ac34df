//! Argon2 password hashing for stored user credentials.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors_service::CatalogServiceError;

/// Hashes `password` into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, CatalogServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CatalogServiceError::Internal(anyhow::anyhow!("password hashing failed: {e}")))
}

/// Checks `password` against a stored PHC hash. A malformed hash never matches.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("123456").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("123456", &hash));
        assert!(!verify_password("654321", &hash));
    }

    #[test]
    fn same_password_gets_different_salts() {
        assert_ne!(hash_password("123456").unwrap(), hash_password("123456").unwrap());
    }

    #[test]
    fn garbage_hash_does_not_verify() {
        assert!(!verify_password("123456", "not-a-phc-string"));
    }
}
