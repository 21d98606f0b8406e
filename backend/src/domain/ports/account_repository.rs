//! Port for account registration and credential lookup.
//!
//! Registration is the one write that spans two tables: a lecturer's user
//! row and its companion lecture row are inserted atomically.

use async_trait::async_trait;

use crate::domain::{EmailAddress, NewAccount, StoredCredentials, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// A unique constraint rejected the write.
        Duplicate { constraint: String } => "account repository unique constraint violated: {constraint}",
        /// A foreign key constraint rejected the write.
        Referenced { constraint: String } => "account repository foreign key violated: {constraint}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert the user row and, when the role owns one, the lecture row in a
    /// single transaction. Either both rows are committed or neither is.
    async fn create(&self, account: &NewAccount) -> Result<User, AccountRepositoryError>;

    /// Look up the user and password digest registered under `email`.
    async fn find_credentials(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredCredentials>, AccountRepositoryError>;
}
