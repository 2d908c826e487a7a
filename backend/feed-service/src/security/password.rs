/// Password hashing and verification using Argon2id
use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};

use crate::error::{AppError, Result};

/// Hash a password using Argon2id
/// Returns the PHC hash string suitable for storage in the database
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(rand::thread_rng());
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal("Failed to hash password".to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a stored hash
///
/// A mismatch and an unparseable hash both collapse into the uniform
/// credential failure so the caller cannot distinguish them.
pub fn verify_password(password: &str, hash: &str) -> Result<()> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AppError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::InvalidCredentials)
}
