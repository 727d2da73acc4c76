//! Argon2id password hashing. Stored values are PHC strings carrying their
//! own salt and parameters.

use std::sync::OnceLock;

use anyhow::anyhow;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow!("password hashing failed: {e}")))
}

/// `false` for a wrong password or an unparseable stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash is malformed: {e}");
            false
        }
    }
}

/// Hashes on the blocking pool; Argon2 is deliberately slow.
pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
}

pub async fn verify_password_blocking(password: String, stored_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| AppError::Internal(e.into()))
}

/// Stands in for the stored hash when the account does not exist.
static UNKNOWN_ACCOUNT_HASH: OnceLock<String> = OnceLock::new();

fn unknown_account_hash() -> Result<&'static str, AppError> {
    if let Some(hash) = UNKNOWN_ACCOUNT_HASH.get() {
        return Ok(hash.as_str());
    }
    let hash = hash_password("jobmatch-unknown-account")?;
    Ok(UNKNOWN_ACCOUNT_HASH.get_or_init(|| hash).as_str())
}

/// Runs a full Argon2 verification for an email with no account so the
/// response time matches a wrong-password attempt.
pub async fn verify_unknown_account_blocking(password: String) -> Result<(), AppError> {
    tokio::task::spawn_blocking(move || {
        let hash = unknown_account_hash()?;
        verify_password(&password, hash);
        Ok(())
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))?
}
