//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed campus entities used by the API and
//! persistence layers, plus the services that enforce cross-entity rules
//! before anything is written.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable keys.
//! - User, Class, Lecture, Room, Course: stored aggregates.
//! - `*Service`: driving-port implementations, generic over driven ports.

pub mod auth;
mod auth_service;
pub mod class;
mod class_service;
pub mod course;
mod course_service;
pub mod error;
pub mod ids;
pub mod lecture;
mod lecture_service;
pub mod ports;
pub mod role;
pub mod room;
mod room_service;
mod service_support;
#[cfg(test)]
mod test_fixtures;
pub mod trace_id;
pub mod user;
mod user_service;

pub use self::auth::{
    AccessToken, AuthSession, CredentialValidationError, LoginCredentials, NewAccount,
    PASSWORD_MIN, Password, PasswordChange, PasswordHash, Registration, StoredCredentials,
    TOKEN_TTL_HOURS, TokenClaims,
};
pub use self::auth_service::AuthService;
pub use self::class::{
    Class, ClassDraft, ClassName, JOIN_CODE_LEN, JoinCode, LabelValidationError, NewClass,
};
pub use self::class_service::ClassService;
pub use self::course::{Course, CourseDraft};
pub use self::course_service::CourseService;
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::ids::{ClassId, CourseId, LectureId, RoomId, UserId};
pub use self::lecture::{Lecture, LectureDraft, LectureName};
pub use self::lecture_service::LectureService;
pub use self::role::{Role, RoleParseError};
pub use self::room::{ROOM_TIME_FORMAT, ROOM_URL_MAX, Room, RoomDraft, RoomSchedule, RoomValidationError};
pub use self::room_service::RoomService;
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, Npm, PersonName, User, UserProfile, UserValidationError};
pub use self::user_service::UserService;

