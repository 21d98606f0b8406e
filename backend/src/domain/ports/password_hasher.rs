//! Port for one-way password digests.

use async_trait::async_trait;

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised while producing a digest.
    pub enum PasswordHasherError {
        /// The hashing primitive rejected its input or parameters.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Slow, salted password hashing.
///
/// `verify` fails closed: a malformed or foreign digest counts as a mismatch
/// rather than an error. Both calls are CPU-bound; adapters keep them off
/// the request executor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError>;

    async fn verify(&self, hash: &PasswordHash, candidate: &Password) -> bool;
}
