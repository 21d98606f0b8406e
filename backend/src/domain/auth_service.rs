//! Registration and login.
//!
//! Registration runs every cross-entity check before the account repository
//! opens its transaction, so a rejected request leaves no rows behind.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    AccountRepository, AuthCommand, ClassRepository, PasswordHasher, TokenIssuer, UserRepository,
};
use crate::domain::service_support::{
    ensure_class_exists, map_account_error, map_hasher_error, map_user_error,
};
use crate::domain::{AuthSession, Error, LoginCredentials, NewAccount, Registration, User};

const LOGIN_FAILED: &str = "email or password is incorrect";

/// Account service implementing [`AuthCommand`].
#[derive(Clone)]
pub struct AuthService<A, U, C, H, T> {
    accounts: Arc<A>,
    users: Arc<U>,
    classes: Arc<C>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<A, U, C, H, T> AuthService<A, U, C, H, T> {
    pub fn new(
        accounts: Arc<A>,
        users: Arc<U>,
        classes: Arc<C>,
        hasher: Arc<H>,
        tokens: Arc<T>,
    ) -> Self {
        Self {
            accounts,
            users,
            classes,
            hasher,
            tokens,
        }
    }
}

fn login_failed() -> Error {
    Error::bad_request(LOGIN_FAILED)
}

#[async_trait]
impl<A, U, C, H, T> AuthCommand for AuthService<A, U, C, H, T>
where
    A: AccountRepository,
    U: UserRepository,
    C: ClassRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let Registration { profile, password } = registration;

        ensure_class_exists(self.classes.as_ref(), profile.class_id).await?;

        if self
            .users
            .find_by_email(&profile.email)
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(Error::already_use("email is already in use")
                .with_details(json!({ "field": "email" })));
        }

        if let Some(npm) = profile.npm.as_ref() {
            if self
                .users
                .find_by_npm(npm)
                .await
                .map_err(map_user_error)?
                .is_some()
            {
                return Err(Error::already_use("npm is already in use")
                    .with_details(json!({ "field": "npm" })));
            }
        }

        let password_hash = self
            .hasher
            .hash(&password)
            .await
            .map_err(map_hasher_error)?;
        let user = self
            .accounts
            .create(&NewAccount {
                profile,
                password_hash,
            })
            .await
            .map_err(map_account_error)?;

        info!(user_id = %user.id, role = %user.role, "account registered");
        Ok(user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error> {
        let Some(stored) = self
            .accounts
            .find_credentials(credentials.email())
            .await
            .map_err(map_account_error)?
        else {
            debug!("login for unknown email");
            return Err(login_failed());
        };

        if !self
            .hasher
            .verify(&stored.password_hash, credentials.password())
            .await
        {
            debug!(user_id = %stored.user.id, "login with wrong password");
            return Err(login_failed());
        }

        let token = self
            .tokens
            .issue(&stored.user)
            .map_err(|err| Error::internal(err.to_string()))?;
        info!(user_id = %stored.user.id, "login succeeded");
        Ok(AuthSession {
            token,
            user: stored.user,
        })
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
