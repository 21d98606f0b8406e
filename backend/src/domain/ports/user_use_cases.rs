//! Driving ports for account maintenance.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, Password, PasswordChange, User, UserId, UserProfile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Replace the profile of `id`. Keeping the current e-mail or NPM is fine;
    /// taking one owned by another account is not.
    async fn update(&self, id: UserId, profile: UserProfile) -> Result<User, Error>;

    /// Move the account to a new e-mail address.
    async fn change_email(&self, id: UserId, email: EmailAddress) -> Result<User, Error>;

    async fn change_password(&self, id: UserId, change: PasswordChange) -> Result<(), Error>;

    /// Delete the account once `password` matches the stored digest.
    async fn delete(&self, id: UserId, password: Password) -> Result<(), Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<User, Error>;
}
