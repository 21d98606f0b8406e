//! Rooms: scheduled online sessions attached to a lecture.

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use utoipa::ToSchema;

use crate::domain::class::{LabelValidationError, validate_label, validate_text};
use crate::domain::{LectureId, RoomId};

/// Wire and storage format for room timestamps.
pub const ROOM_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Upper bound, in characters, on a room's meeting link.
pub const ROOM_URL_MAX: usize = 2048;

/// Validation errors for room inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomValidationError {
    #[error(transparent)]
    Label(#[from] LabelValidationError),
    #[error("{field} must use the format YYYY-MM-DD HH:MM:SS")]
    InvalidTime { field: &'static str },
    #[error("end_room must be after start_room")]
    EndBeforeStart,
}

impl RoomValidationError {
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Label(inner) => inner.field(),
            Self::InvalidTime { field } => *field,
            Self::EndBeforeStart => "end_room",
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Label(inner) => inner.code(),
            Self::InvalidTime { .. } => "invalid_timestamp",
            Self::EndBeforeStart => "invalid_range",
        }
    }
}

/// Start and end of a room session.
///
/// ## Invariants
/// - `end` is strictly after `start`.
///
/// # Examples
/// ```
/// use campus_backend::domain::RoomSchedule;
///
/// let schedule = RoomSchedule::parse("2024-03-01 08:00:00", "2024-03-01 09:40:00").unwrap();
/// assert_eq!(schedule.start().to_string(), "2024-03-01 08:00:00");
/// assert!(RoomSchedule::parse("2024-03-01 09:00:00", "2024-03-01 08:00:00").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct RoomSchedule {
    #[serde(rename = "start_room", serialize_with = "serialize_room_time")]
    #[schema(value_type = String, example = "2024-03-01 08:00:00")]
    start: NaiveDateTime,
    #[serde(rename = "end_room", serialize_with = "serialize_room_time")]
    #[schema(value_type = String, example = "2024-03-01 09:40:00")]
    end: NaiveDateTime,
}

impl RoomSchedule {
    /// Parse both bounds from [`ROOM_TIME_FORMAT`].
    pub fn parse(start: &str, end: &str) -> Result<Self, RoomValidationError> {
        let start = NaiveDateTime::parse_from_str(start.trim(), ROOM_TIME_FORMAT)
            .map_err(|_| RoomValidationError::InvalidTime { field: "start_room" })?;
        let end = NaiveDateTime::parse_from_str(end.trim(), ROOM_TIME_FORMAT)
            .map_err(|_| RoomValidationError::InvalidTime { field: "end_room" })?;
        Self::new(start, end)
    }

    /// Build a schedule from already-parsed bounds.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, RoomValidationError> {
        if end <= start {
            return Err(RoomValidationError::EndBeforeStart);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

fn serialize_room_time<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(ROOM_TIME_FORMAT))
}

/// Input for creating or updating a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDraft {
    pub name: String,
    pub url: String,
    pub lecture_id: LectureId,
    pub schedule: RoomSchedule,
}

impl RoomDraft {
    /// Validate the free-text parts of a room.
    pub fn try_new(
        name: &str,
        url: &str,
        lecture_id: LectureId,
        schedule: RoomSchedule,
    ) -> Result<Self, RoomValidationError> {
        let name = validate_label(name, "name")?;
        let url = validate_text(url, "url", ROOM_URL_MAX)?;
        Ok(Self {
            name,
            url,
            lecture_id,
            schedule,
        })
    }
}

/// Stored room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub url: String,
    pub lecture_id: LectureId,
    #[serde(flatten)]
    pub schedule: RoomSchedule,
}

impl Room {
    pub fn from_draft(id: RoomId, draft: RoomDraft) -> Self {
        Self {
            id,
            name: draft.name,
            url: draft.url,
            lecture_id: draft.lecture_id,
            schedule: draft.schedule,
        }
    }
}
