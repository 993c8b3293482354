//! Password hashing and verification.
//!
//! One-way adaptive hashing via bcrypt; hashes embed their own salt and cost.

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

/// Hash a plain password for storage.
pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Verify a plain password against a stored hash.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, BcryptError> {
    verify(password, hashed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hashed = hash_password("Secret1!").unwrap();
        assert_ne!(hashed, "Secret1!");
        assert!(verify_password("Secret1!", &hashed).unwrap());
        assert!(!verify_password("wrong", &hashed).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("Secret1!").unwrap();
        let b = hash_password("Secret1!").unwrap();
        assert_ne!(a, b);
    }
}
