//! Account maintenance: profile edits, e-mail and password changes, deletion.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    ClassRepository, PasswordHasher, UserCommand, UserQuery, UserRepository,
};
use crate::domain::service_support::{ensure_class_exists, map_hasher_error, map_user_error};
use crate::domain::{
    EmailAddress, Error, Password, PasswordChange, PasswordHash, User, UserId, UserProfile,
};

/// User service implementing [`UserCommand`] and [`UserQuery`].
#[derive(Clone)]
pub struct UserService<U, C, H> {
    users: Arc<U>,
    classes: Arc<C>,
    hasher: Arc<H>,
}

impl<U, C, H> UserService<U, C, H> {
    pub fn new(users: Arc<U>, classes: Arc<C>, hasher: Arc<H>) -> Self {
        Self {
            users,
            classes,
            hasher,
        }
    }
}

fn user_not_found(id: UserId) -> Error {
    Error::not_found(format!("user {id} not found"))
}

fn wrong_password() -> Error {
    Error::bad_request("password is incorrect").with_details(json!({ "field": "password" }))
}

impl<U, C, H> UserService<U, C, H>
where
    U: UserRepository,
    C: ClassRepository,
    H: PasswordHasher,
{
    async fn require_user(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| user_not_found(id))
    }

    async fn require_hash(&self, id: UserId) -> Result<PasswordHash, Error> {
        self.users
            .password_hash(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| user_not_found(id))
    }

    /// Reject `email` when a different account holds it.
    async fn ensure_email_free_for(&self, id: UserId, email: &EmailAddress) -> Result<(), Error> {
        match self
            .users
            .find_by_email(email)
            .await
            .map_err(map_user_error)?
        {
            Some(owner) if owner.id != id => Err(Error::already_use("email is already in use")
                .with_details(json!({ "field": "email" }))),
            _ => Ok(()),
        }
    }

    async fn verify_password(&self, id: UserId, candidate: &Password) -> Result<(), Error> {
        let stored = self.require_hash(id).await?;
        if self.hasher.verify(&stored, candidate).await {
            Ok(())
        } else {
            Err(wrong_password())
        }
    }
}

#[async_trait]
impl<U, C, H> UserCommand for UserService<U, C, H>
where
    U: UserRepository,
    C: ClassRepository,
    H: PasswordHasher,
{
    async fn update(&self, id: UserId, profile: UserProfile) -> Result<User, Error> {
        self.require_user(id).await?;
        ensure_class_exists(self.classes.as_ref(), profile.class_id).await?;
        self.ensure_email_free_for(id, &profile.email).await?;

        if let Some(npm) = profile.npm.as_ref() {
            if let Some(owner) = self.users.find_by_npm(npm).await.map_err(map_user_error)? {
                if owner.id != id {
                    return Err(Error::already_use("npm is already in use")
                        .with_details(json!({ "field": "npm" })));
                }
            }
        }

        let user = self
            .users
            .update_profile(id, &profile)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| user_not_found(id))?;
        info!(user_id = %id, "profile updated");
        Ok(user)
    }

    async fn change_email(&self, id: UserId, email: EmailAddress) -> Result<User, Error> {
        let current = self.require_user(id).await?;
        if current.email == email {
            return Err(Error::previous_field_not_allowed(
                "new email must differ from the current one",
            )
            .with_details(json!({ "field": "email" })));
        }
        self.ensure_email_free_for(id, &email).await?;

        let user = self
            .users
            .update_email(id, &email)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| user_not_found(id))?;
        info!(user_id = %id, "email changed");
        Ok(user)
    }

    async fn change_password(&self, id: UserId, change: PasswordChange) -> Result<(), Error> {
        self.verify_password(id, &change.current).await?;

        let digest = self
            .hasher
            .hash(&change.replacement)
            .await
            .map_err(map_hasher_error)?;
        if !self
            .users
            .update_password(id, &digest)
            .await
            .map_err(map_user_error)?
        {
            return Err(user_not_found(id));
        }
        info!(user_id = %id, "password changed");
        Ok(())
    }

    async fn delete(&self, id: UserId, password: Password) -> Result<(), Error> {
        self.verify_password(id, &password).await?;

        if !self.users.delete(id).await.map_err(map_user_error)? {
            return Err(user_not_found(id));
        }
        info!(user_id = %id, "account deleted");
        Ok(())
    }
}

#[async_trait]
impl<U, C, H> UserQuery for UserService<U, C, H>
where
    U: UserRepository,
    C: ClassRepository,
    H: PasswordHasher,
{
    async fn find_by_id(&self, id: UserId) -> Result<User, Error> {
        self.require_user(id).await
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
