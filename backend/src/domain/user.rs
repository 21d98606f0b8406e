//! User data model.
//!
//! Values arriving from adapters are validated once, here, and carried as
//! newtypes afterwards so services never re-check formatting.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ClassId, Role, UserId};

/// Validation errors raised by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    NameTooShort { min: usize },
    NameTooLong { max: usize },
    InvalidEmail,
    InvalidNpm,
    MissingNpm,
    MissingClass,
}

impl UserValidationError {
    /// Request field the error refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NameTooShort { .. } | Self::NameTooLong { .. } => "name",
            Self::InvalidEmail => "email",
            Self::InvalidNpm | Self::MissingNpm => "npm",
            Self::MissingClass => "class_id",
        }
    }

    /// Machine-readable reason, stable across releases.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NameTooShort { .. } => "too_short",
            Self::NameTooLong { .. } => "too_long",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidNpm => "invalid_npm",
            Self::MissingNpm | Self::MissingClass => "required_for_role",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameTooShort { min } => write!(f, "name must be at least {min} characters"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::InvalidNpm => write!(f, "npm may only contain letters and digits"),
            Self::MissingNpm => write!(f, "npm is required for students"),
            Self::MissingClass => write!(f, "class_id is required for students"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Minimum length of a person's name.
pub const NAME_MIN: usize = 5;
/// Maximum length of a person's name.
pub const NAME_MAX: usize = 100;
const NPM_MAX: usize = 20;

/// Person name, trimmed and length checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Validate and construct a name.
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = name.as_ref().trim();
        let length = trimmed.chars().count();
        if length < NAME_MIN {
            return Err(UserValidationError::NameTooShort { min: NAME_MIN });
        }
        if length > NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<PersonName> for String {
    fn from(value: PersonName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PersonName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Normalised (trimmed, lowercased) e-mail address.
///
/// # Examples
/// ```
/// use campus_backend::domain::EmailAddress;
///
/// let email = EmailAddress::new(" A@X.com ").unwrap();
/// assert_eq!(email.as_str(), "a@x.com");
/// assert!(EmailAddress::new("not-an-email").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise an address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        let (local, domain) = normalised
            .split_once('@')
            .ok_or(UserValidationError::InvalidEmail)?;
        let domain_ok = domain
            .split('.')
            .all(|label| !label.is_empty())
            && domain.contains('.');
        if local.is_empty()
            || !domain_ok
            || domain.contains('@')
            || normalised.chars().any(char::is_whitespace)
        {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Student registration number (NPM).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Npm(String);

impl Npm {
    /// Validate an NPM: alphanumeric, non-empty, at most 20 characters.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty()
            || trimmed.len() > NPM_MAX
            || !trimmed.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(UserValidationError::InvalidNpm);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Parse an optional raw value, treating blank input as absent.
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>, UserValidationError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => Self::new(value).map(Some),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Npm> for String {
    fn from(value: Npm) -> Self {
        value.0
    }
}

impl TryFrom<String> for Npm {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Profile fields shared by registration and profile updates.
///
/// ## Invariants
/// - Students always carry both an NPM and a class reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: PersonName,
    pub email: EmailAddress,
    pub role: Role,
    pub npm: Option<Npm>,
    pub class_id: Option<ClassId>,
}

impl UserProfile {
    /// Assemble a profile, enforcing the role-conditional fields.
    pub fn try_new(
        name: PersonName,
        email: EmailAddress,
        role: Role,
        npm: Option<Npm>,
        class_id: Option<ClassId>,
    ) -> Result<Self, UserValidationError> {
        if role.requires_enrolment() {
            if npm.is_none() {
                return Err(UserValidationError::MissingNpm);
            }
            if class_id.is_none() {
                return Err(UserValidationError::MissingClass);
            }
        }
        Ok(Self {
            name,
            email,
            role,
            npm,
            class_id,
        })
    }
}

/// Stored user as exposed to adapters. The password digest never leaves the
/// persistence and credential layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct User {
    pub id: UserId,
    #[schema(value_type = String, example = "Ada Lovelace")]
    pub name: PersonName,
    #[schema(value_type = String, example = "ada@campus.ac.id")]
    pub email: EmailAddress,
    pub role: Role,
    #[schema(value_type = Option<String>, example = "2107411001")]
    pub npm: Option<Npm>,
    pub class_id: Option<ClassId>,
}

impl User {
    /// Attach an identifier to a validated profile.
    pub fn from_profile(id: UserId, profile: UserProfile) -> Self {
        let UserProfile {
            name,
            email,
            role,
            npm,
            class_id,
        } = profile;
        Self {
            id,
            name,
            email,
            role,
            npm,
            class_id,
        }
    }
}
