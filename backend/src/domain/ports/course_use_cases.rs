//! Driving ports for courses.

use async_trait::async_trait;

use crate::domain::{Course, CourseDraft, CourseId, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCommand: Send + Sync {
    async fn create(&self, draft: CourseDraft) -> Result<Course, Error>;

    async fn update(&self, id: CourseId, draft: CourseDraft) -> Result<Course, Error>;

    async fn delete(&self, id: CourseId) -> Result<(), Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseQuery: Send + Sync {
    async fn find_by_id(&self, id: CourseId) -> Result<Course, Error>;

    /// Courses whose name contains `fragment`.
    async fn search_by_name(&self, fragment: String) -> Result<Vec<Course>, Error>;
}
