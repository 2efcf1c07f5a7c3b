//! Password hashing helpers

use crate::errors::DomainError;

pub fn hash_password(password: &str, cost: u32) -> Result<String, DomainError> {
    bcrypt::hash(password, cost)
        .map_err(|e| DomainError::internal(format!("password hashing failed: {}", e)))
}

/// Check a password against a stored hash; a malformed hash never matches
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
