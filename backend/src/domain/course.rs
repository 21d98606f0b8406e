//! Courses ("mata kuliah").

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::CourseId;
use crate::domain::class::{LabelValidationError, validate_label};

/// Input for creating or updating a course.
///
/// The course code is stored upper-case so `if101` and `IF101` collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub name: String,
    pub code: String,
}

impl CourseDraft {
    pub fn try_new(name: &str, code: &str) -> Result<Self, LabelValidationError> {
        let name = validate_label(name, "name")?;
        let code = validate_label(code, "kode_matkul")?.to_uppercase();
        Ok(Self { name, code })
    }
}

/// Stored course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Course {
    pub id: CourseId,
    #[schema(example = "Struktur Data")]
    pub name: String,
    #[serde(rename = "kode_matkul")]
    #[schema(example = "IF201")]
    pub code: String,
}

impl Course {
    pub fn from_draft(id: CourseId, draft: CourseDraft) -> Self {
        Self {
            id,
            name: draft.name,
            code: draft.code,
        }
    }
}
