//! Account roles and the requirements each role carries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role attached to every account.
///
/// Parsing is case-insensitive and accepts the Indonesian labels used by
/// existing clients (`mahasiswa`, `dosen`, `guru`).
///
/// # Examples
/// ```
/// use campus_backend::domain::Role;
///
/// let role: Role = "Dosen".parse().unwrap();
/// assert_eq!(role, Role::Lecturer);
/// assert!(role.owns_lecture());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Enrolled student; must carry an NPM and a class.
    Student,
    /// Teaching staff; owns a lecture record.
    Lecturer,
    /// Administrative account.
    Admin,
}

/// Raised when a role label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl Role {
    /// Canonical storage label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Lecturer => "lecturer",
            Self::Admin => "admin",
        }
    }

    /// Whether accounts with this role must have an NPM and class.
    pub const fn requires_enrolment(self) -> bool {
        matches!(self, Self::Student)
    }

    /// Whether registering this role also creates a lecture row.
    pub const fn owns_lecture(self) -> bool {
        matches!(self, Self::Lecturer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" | "mahasiswa" => Ok(Self::Student),
            "lecturer" | "teacher" | "dosen" | "guru" => Ok(Self::Lecturer),
            "admin" => Ok(Self::Admin),
            _ => Err(RoleParseError(s.to_owned())),
        }
    }
}
