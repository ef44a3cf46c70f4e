//! Password digests (Argon2id, PHC string format)

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use std::sync::OnceLock;

use crate::error::{AuthError, AuthResult};

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored digest
///
/// Returns `Ok(false)` on mismatch; an unparseable digest is an error.
pub fn verify_password(password: &str, digest: &str) -> AuthResult<bool> {
    let parsed_hash = PasswordHash::new(digest)
        .map_err(|e| AuthError::Hashing(format!("Failed to parse password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Burn one verification against a throwaway digest.
///
/// Used when the username does not exist so the response time matches a
/// wrong-password attempt.
pub fn verify_against_dummy(password: &str) {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

    let dummy = DUMMY_HASH.get_or_init(|| hash_password("dummy-password").ok());
    if let Some(digest) = dummy {
        let _ = verify_password(password, digest);
    }
}
