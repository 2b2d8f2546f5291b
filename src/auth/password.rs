use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use thiserror::Error;

/// Failures that are the server's fault, never the caller's. A wrong password
/// is not one of them: it is `Ok(false)` from [`verify_password`].
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("argon2 hashing failed: {0}")]
    Hash(String),

    #[error("stored password hash is unreadable: {0}")]
    CorruptHash(String),
}

lazy_static! {
    /// Verified against when login finds no account, so an unknown email costs
    /// the same argon2 work as a wrong password.
    static ref DECOY_HASH: Option<String> = hash_password("decoy-password").ok();
}

/// PHC string for a new account; Argon2id defaults with a fresh salt.
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Checks a login attempt against the stored hash.
///
/// `Ok(false)` becomes the same "Invalid credentials" 401 that an unknown
/// email gets. `Err` means the row itself is bad and surfaces as a 500.
pub fn verify_password(plain: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(|e| PasswordError::CorruptHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Spends one verification on the decoy hash. Always `false`.
pub fn verify_decoy(plain: &str) -> bool {
    if let Some(decoy) = DECOY_HASH.as_deref() {
        let _ = verify_password(plain, decoy);
    }
    false
}
