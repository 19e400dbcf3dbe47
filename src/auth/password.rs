//! Argon2id password hashes stored as PHC strings.

use anyhow::{anyhow, Context};
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;

lazy_static! {
    // hashed on first use; a failure leaves `None` and the check is skipped
    static ref DECOY_HASH: Option<String> = hash_password("fintrack-decoy-password").ok();
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| anyhow!("hash password: {e}"))
}

/// `Ok(false)` for a wrong password; `Err` only when the stored hash is unreadable.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let phc = PasswordHash::new(stored).map_err(|e| anyhow!("stored password hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &phc)
        .is_ok())
}

pub async fn hash_password_async(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .context("password hashing task")?
}

pub async fn verify_password_async(plain: String, stored: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&plain, &stored))
        .await
        .context("password verification task")?
}

/// Spends the time of one verification without a stored hash, so an
/// unknown account costs as much as a wrong password. Always `false`.
pub async fn verify_decoy_async(plain: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || match DECOY_HASH.as_deref() {
        Some(decoy) => verify_password(&plain, decoy).map(|_| false),
        None => Ok(false),
    })
    .await
    .context("password verification task")?
}
