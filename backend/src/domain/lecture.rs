//! Lectures: the teaching record owned by a lecturer account.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::class::{LabelValidationError, validate_label};
use crate::domain::{LectureId, UserId};

/// Display name of a lecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LectureName(String);

impl LectureName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, LabelValidationError> {
        validate_label(raw.as_ref(), "name").map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Input for creating or updating a lecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LectureDraft {
    pub name: LectureName,
    pub user_id: UserId,
}

/// Stored lecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Lecture {
    pub id: LectureId,
    #[schema(value_type = String, example = "Dr. Ada Lovelace")]
    pub name: LectureName,
    pub user_id: UserId,
}

impl Lecture {
    pub fn from_draft(id: LectureId, draft: LectureDraft) -> Self {
        Self {
            id,
            name: draft.name,
            user_id: draft.user_id,
        }
    }
}
