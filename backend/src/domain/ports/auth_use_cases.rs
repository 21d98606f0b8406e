//! Driving port for registration and login.
//!
//! Inbound adapters call this port without knowing the backing
//! infrastructure, so handler tests can substitute a mock.

use async_trait::async_trait;

use crate::domain::{AuthSession, Error, LoginCredentials, Registration, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthCommand: Send + Sync {
    /// Create an account after the uniqueness and reference checks pass.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Check credentials and issue a signed token.
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error>;
}
