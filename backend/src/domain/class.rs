//! Classes and their join codes.

use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ClassId;

const JOIN_CODE_ALPHABET: &[u8] = b"123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Number of characters in a generated join code.
pub const JOIN_CODE_LEN: usize = 10;
const LABEL_MAX: usize = 100;

/// Validation errors for labels such as class, lecture, room and course names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

impl LabelValidationError {
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } => *field,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "missing_field",
            Self::TooLong { .. } => "too_long",
        }
    }
}

/// Trim `raw` and check it is a usable label for `field`.
pub(crate) fn validate_label(
    raw: &str,
    field: &'static str,
) -> Result<String, LabelValidationError> {
    validate_text(raw, field, LABEL_MAX)
}

/// Trim `raw` and check it is non-empty and at most `max` characters.
pub(crate) fn validate_text(
    raw: &str,
    field: &'static str,
    max: usize,
) -> Result<String, LabelValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LabelValidationError::Empty { field });
    }
    if trimmed.chars().count() > max {
        return Err(LabelValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

/// Unique class name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassName(String);

impl ClassName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, LabelValidationError> {
        validate_label(raw.as_ref(), "name").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<ClassName> for String {
    fn from(value: ClassName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ClassName {
    type Error = LabelValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Code students use to join a class ("kode kelas").
///
/// # Examples
/// ```
/// use campus_backend::domain::{JoinCode, JOIN_CODE_LEN};
///
/// let code = JoinCode::generate(&mut rand::thread_rng());
/// assert_eq!(code.as_str().len(), JOIN_CODE_LEN);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoinCode(String);

impl JoinCode {
    /// Draw a fresh code from `rng`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..JOIN_CODE_LEN)
            .map(|_| {
                let index = rng.gen_range(0..JOIN_CODE_ALPHABET.len());
                char::from(JOIN_CODE_ALPHABET.get(index).copied().unwrap_or(b'A'))
            })
            .collect();
        Self(code)
    }

    /// Rehydrate a stored code.
    pub fn from_stored(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Input for creating or renaming a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDraft {
    pub name: ClassName,
}

/// Stored class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Class {
    pub id: ClassId,
    #[schema(value_type = String, example = "TI-3A")]
    pub name: ClassName,
    #[schema(value_type = String, example = "7KQ2M9XZ4B")]
    pub join_code: JoinCode,
}

/// Class row ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClass {
    pub name: ClassName,
    pub join_code: JoinCode,
}
