//! Driving ports for lectures.

use async_trait::async_trait;

use crate::domain::{Error, Lecture, LectureDraft, LectureId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LectureCommand: Send + Sync {
    async fn create(&self, draft: LectureDraft) -> Result<Lecture, Error>;

    async fn update(&self, id: LectureId, draft: LectureDraft) -> Result<Lecture, Error>;

    async fn delete(&self, id: LectureId) -> Result<(), Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LectureQuery: Send + Sync {
    async fn find_by_id(&self, id: LectureId) -> Result<Lecture, Error>;

    async fn find_by_name(&self, name: String) -> Result<Vec<Lecture>, Error>;

    async fn find_by_user_id(&self, user_id: UserId) -> Result<Lecture, Error>;
}
