//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{ClassId, EmailAddress, Npm, PasswordHash, User, UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique constraint rejected the write.
        Duplicate { constraint: String } => "user repository unique constraint violated: {constraint}",
        /// A foreign key constraint rejected the write.
        Referenced { constraint: String } => "user repository foreign key violated: {constraint}",
    }
}

/// Reads and single-table writes against `users`.
///
/// Lookups return `Ok(None)` when nothing matches; absence is a normal
/// outcome that services turn into `NOT_FOUND` only where that is the rule.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError>;

    async fn find_by_npm(&self, npm: &Npm) -> Result<Option<User>, UserRepositoryError>;

    /// Number of users whose `class_id` points at `class_id`.
    async fn count_by_class(&self, class_id: ClassId) -> Result<u64, UserRepositoryError>;

    /// Stored password digest for `id`.
    async fn password_hash(
        &self,
        id: UserId,
    ) -> Result<Option<PasswordHash>, UserRepositoryError>;

    /// Overwrite the profile columns; returns `None` if the row vanished.
    ///
    /// The companion lecture follows the role: created for a lecturer,
    /// renamed with the user, removed when the role no longer owns one.
    /// Rooms still scheduled on that lecture yield `Referenced`.
    async fn update_profile(
        &self,
        id: UserId,
        profile: &UserProfile,
    ) -> Result<Option<User>, UserRepositoryError>;

    async fn update_email(
        &self,
        id: UserId,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError>;

    async fn update_password(
        &self,
        id: UserId,
        hash: &PasswordHash,
    ) -> Result<bool, UserRepositoryError>;

    /// Remove the user (and its lecture); returns whether a row was deleted.
    async fn delete(&self, id: UserId) -> Result<bool, UserRepositoryError>;
}
