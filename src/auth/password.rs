//! Password hashing and verification.
//!
//! Passwords are stored as Argon2id hashes in PHC string format, each with
//! its own random salt. Verification goes through the argon2 crate, which
//! compares in constant time.

use argon2::{
    password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use rand::rngs::OsRng;

use crate::errors::{AppError, AppResult};

/// Hash a clear text password into a PHC string safe to persist.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))
}

/// Check a clear text password against a stored PHC string.
///
/// A malformed stored hash verifies as `false` rather than erroring, so a
/// corrupted record reads as bad credentials.
pub fn verify_password(password: &str, phc_hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(phc_hash) {
        Ok(hash) => hash,
        Err(e) => {
            log::warn!("Stored password hash could not be parsed: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
