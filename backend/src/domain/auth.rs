//! Authentication primitives: passwords, credentials and token claims.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::{ClassId, EmailAddress, Role, User, UserId, UserProfile};

/// Minimum accepted length for a new password.
pub const PASSWORD_MIN: usize = 6;

/// Lifetime of an issued access token.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Domain error returned when credential inputs are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialValidationError {
    /// E-mail was missing or malformed.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// Password shorter than [`PASSWORD_MIN`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

impl CredentialValidationError {
    /// Request field the error refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "email",
            Self::PasswordTooShort { .. } | Self::EmptyPassword => "password",
        }
    }

    /// Machine-readable reason.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "invalid_email",
            Self::PasswordTooShort { .. } => "too_short",
            Self::EmptyPassword => "empty_password",
        }
    }
}

/// Plain-text password held only for the duration of a request.
///
/// The buffer is zeroed on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Accept a new password, enforcing the minimum length.
    pub fn new(raw: &str) -> Result<Self, CredentialValidationError> {
        if raw.chars().count() < PASSWORD_MIN {
            return Err(CredentialValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Accept a password that is only compared against a stored digest.
    ///
    /// Older accounts may predate the length rule, so only blank input is
    /// rejected.
    pub fn confirmation(raw: &str) -> Result<Self, CredentialValidationError> {
        if raw.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Salted one-way digest of a password, in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Validated login credentials used by the authentication service.
///
/// # Examples
/// ```
/// use campus_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("a@x.com", "secret1").unwrap();
/// assert_eq!(creds.email().as_str(), "a@x.com");
/// assert_eq!(creds.password().expose(), "secret1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw e-mail/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialValidationError> {
        let email =
            EmailAddress::new(email).map_err(|_| CredentialValidationError::InvalidEmail)?;
        let password = Password::new(password)?;
        Ok(Self { email, password })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// A registration request that passed structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub profile: UserProfile,
    pub password: Password,
}

/// Account row ready for insertion: profile plus password digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub profile: UserProfile,
    pub password_hash: PasswordHash,
}

/// User together with the stored digest, for credential checks only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user: User,
    pub password_hash: PasswordHash,
}

/// Password change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    pub current: Password,
    pub replacement: Password,
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenClaims {
    pub iss: String,
    pub sub: String,
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub class_id: Option<ClassId>,
    pub exp: i64,
    pub nbf: i64,
    pub iat: i64,
}

impl TokenClaims {
    /// Build claims for `user`, valid from `issued_at` for [`TOKEN_TTL_HOURS`].
    pub fn for_user(user: &User, issuer: &str, issued_at: DateTime<Utc>) -> Self {
        let expires_at = issued_at + Duration::hours(TOKEN_TTL_HOURS);
        Self {
            iss: issuer.to_owned(),
            sub: user.id.to_string(),
            id: user.id,
            name: user.name.as_str().to_owned(),
            email: user.email.as_str().to_owned(),
            role: user.role,
            class_id: user.class_id,
            exp: expires_at.timestamp(),
            nbf: issued_at.timestamp(),
            iat: issued_at.timestamp(),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.id
    }
}

/// Signed compact token string.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: AccessToken,
    pub user: User,
}
