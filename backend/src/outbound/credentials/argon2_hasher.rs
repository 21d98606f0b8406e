//! Argon2id password hashing.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash as EncodedHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use async_trait::async_trait;
use tokio::task;
use tracing::warn;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{Password, PasswordHash};

/// [`PasswordHasher`] backed by Argon2id with the crate's default parameters
/// and a fresh random salt per digest.
///
/// Each digest runs on tokio's blocking pool so a login does not stall the
/// other requests sharing its actix worker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

fn hash_blocking(password: &Password) -> Result<PasswordHash, PasswordHasherError> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(password.expose().as_bytes(), &salt)
        .map_err(|err| PasswordHasherError::hashing(err.to_string()))?;
    Ok(PasswordHash::new(digest.to_string()))
}

fn verify_blocking(hash: &PasswordHash, candidate: &Password) -> bool {
    let parsed = match EncodedHash::new(hash.as_str()) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(error = %err, "stored password digest is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(candidate.expose().as_bytes(), &parsed)
        .is_ok()
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError> {
        let password = password.clone();
        task::spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))?
    }

    async fn verify(&self, hash: &PasswordHash, candidate: &Password) -> bool {
        let hash = hash.clone();
        let candidate = candidate.clone();
        match task::spawn_blocking(move || verify_blocking(&hash, &candidate)).await {
            Ok(matched) => matched,
            Err(err) => {
                warn!(error = %err, "password verification task failed");
                false
            }
        }
    }
}
