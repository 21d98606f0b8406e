//! PostgreSQL persistence adapters using Diesel.
//!
//! Concrete implementations of the domain repository ports, backed by
//! `diesel-async` with `bb8` pooling.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and domain
//!   types. Cross-entity rules live in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Constraint backstop**: unique and foreign key violations surface as
//!   `Duplicate` and `Referenced` port errors.
//!
//! ```ignore
//! use campus_backend::outbound::persistence::{DbPool, DieselClassRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/campus")).await?;
//! let classes = DieselClassRepository::new(pool);
//! ```

mod diesel_account_repository;
mod diesel_class_repository;
mod diesel_course_repository;
mod diesel_lecture_repository;
mod diesel_room_repository;
pub(crate) mod diesel_support;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_class_repository::DieselClassRepository;
pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_lecture_repository::DieselLectureRepository;
pub use diesel_room_repository::DieselRoomRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
