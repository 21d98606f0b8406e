//! Port for lecture persistence.
use async_trait::async_trait;

use crate::domain::{Lecture, LectureDraft, LectureId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by lecture repository adapters.
    pub enum LectureRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "lecture repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "lecture repository query failed: {message}",
        /// A unique constraint rejected the write.
        Duplicate { constraint: String } => "lecture repository unique constraint violated: {constraint}",
        /// A foreign key constraint rejected the write.
        Referenced { constraint: String } => "lecture repository foreign key violated: {constraint}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LectureRepository: Send + Sync {
    async fn insert(&self, lecture: &LectureDraft) -> Result<Lecture, LectureRepositoryError>;

    async fn update(
        &self,
        id: LectureId,
        lecture: &LectureDraft,
    ) -> Result<Option<Lecture>, LectureRepositoryError>;

    async fn delete(&self, id: LectureId) -> Result<bool, LectureRepositoryError>;

    async fn find_by_id(&self, id: LectureId)
    -> Result<Option<Lecture>, LectureRepositoryError>;

    /// Lectures whose name contains `name`, case-insensitively.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Lecture>, LectureRepositoryError>;

    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<Lecture>, LectureRepositoryError>;
}
