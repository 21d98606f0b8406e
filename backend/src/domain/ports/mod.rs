//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`TokenIssuer`]) are
//! implemented by outbound adapters. Driving ports (`*Command`, `*Query`) are
//! implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod auth_use_cases;
mod class_repository;
mod class_use_cases;
mod course_repository;
mod course_use_cases;
mod lecture_repository;
mod lecture_use_cases;
mod password_hasher;
mod room_repository;
mod room_use_cases;
mod token_issuer;
mod user_repository;
mod user_use_cases;

pub use account_repository::{AccountRepository, AccountRepositoryError};
pub use auth_use_cases::AuthCommand;
pub use class_repository::{ClassRepository, ClassRepositoryError};
pub use class_use_cases::{ClassCommand, ClassQuery};
pub use course_repository::{CourseRepository, CourseRepositoryError};
pub use course_use_cases::{CourseCommand, CourseQuery};
pub use lecture_repository::{LectureRepository, LectureRepositoryError};
pub use lecture_use_cases::{LectureCommand, LectureQuery};
pub use password_hasher::{PasswordHasher, PasswordHasherError};
pub use room_repository::{RoomRepository, RoomRepositoryError};
pub use room_use_cases::{RoomCommand, RoomQuery};
pub use token_issuer::{TokenError, TokenIssuer};
pub use user_repository::{UserRepository, UserRepositoryError};
pub use user_use_cases::{UserCommand, UserQuery};

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use auth_use_cases::MockAuthCommand;
#[cfg(test)]
pub use class_repository::MockClassRepository;
#[cfg(test)]
pub use class_use_cases::{MockClassCommand, MockClassQuery};
#[cfg(test)]
pub use course_repository::MockCourseRepository;
#[cfg(test)]
pub use course_use_cases::{MockCourseCommand, MockCourseQuery};
#[cfg(test)]
pub use lecture_repository::MockLectureRepository;
#[cfg(test)]
pub use lecture_use_cases::{MockLectureCommand, MockLectureQuery};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
#[cfg(test)]
pub use room_repository::MockRoomRepository;
#[cfg(test)]
pub use room_use_cases::{MockRoomCommand, MockRoomQuery};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use user_use_cases::{MockUserCommand, MockUserQuery};
