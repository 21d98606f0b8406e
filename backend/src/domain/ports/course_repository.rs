//! Port for course ("matkul") persistence.
use async_trait::async_trait;

use crate::domain::{Course, CourseDraft, CourseId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "course repository query failed: {message}",
        /// A unique constraint rejected the write.
        Duplicate { constraint: String } => "course repository unique constraint violated: {constraint}",
        /// A foreign key constraint rejected the write.
        Referenced { constraint: String } => "course repository foreign key violated: {constraint}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn insert(&self, course: &CourseDraft) -> Result<Course, CourseRepositoryError>;

    async fn update(
        &self,
        id: CourseId,
        course: &CourseDraft,
    ) -> Result<Option<Course>, CourseRepositoryError>;

    async fn delete(&self, id: CourseId) -> Result<bool, CourseRepositoryError>;

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<Course>, CourseRepositoryError>;

    /// Courses whose name contains `fragment`, case-insensitively, by id.
    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Course>, CourseRepositoryError>;
}
