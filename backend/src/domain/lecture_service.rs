//! Lecture management. A user owns at most one lecture.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{LectureCommand, LectureQuery, LectureRepository, UserRepository};
use crate::domain::service_support::{map_lecture_error, map_user_error};
use crate::domain::{Error, Lecture, LectureDraft, LectureId, UserId};

/// Lecture service implementing [`LectureCommand`] and [`LectureQuery`].
#[derive(Clone)]
pub struct LectureService<L, U> {
    lectures: Arc<L>,
    users: Arc<U>,
}

impl<L, U> LectureService<L, U> {
    pub fn new(lectures: Arc<L>, users: Arc<U>) -> Self {
        Self { lectures, users }
    }
}

fn lecture_not_found(id: LectureId) -> Error {
    Error::not_found(format!("lecture {id} not found"))
}

impl<L, U> LectureService<L, U>
where
    L: LectureRepository,
    U: UserRepository,
{
    async fn require_lecture(&self, id: LectureId) -> Result<Lecture, Error> {
        self.lectures
            .find_by_id(id)
            .await
            .map_err(map_lecture_error)?
            .ok_or_else(|| lecture_not_found(id))
    }

    /// The owner must exist and must not already own a different lecture.
    async fn check_owner(&self, id: Option<LectureId>, user_id: UserId) -> Result<(), Error> {
        if self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .is_none()
        {
            return Err(Error::not_found(format!("user {user_id} not found"))
                .with_details(json!({ "field": "user_id" })));
        }

        match self
            .lectures
            .find_by_user_id(user_id)
            .await
            .map_err(map_lecture_error)?
        {
            Some(owned) if Some(owned.id) != id => Err(Error::already_use(
                "user already owns a lecture",
            )
            .with_details(json!({ "field": "user_id" }))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<L, U> LectureCommand for LectureService<L, U>
where
    L: LectureRepository,
    U: UserRepository,
{
    async fn create(&self, draft: LectureDraft) -> Result<Lecture, Error> {
        self.check_owner(None, draft.user_id).await?;
        let lecture = self
            .lectures
            .insert(&draft)
            .await
            .map_err(map_lecture_error)?;
        info!(lecture_id = %lecture.id, "lecture created");
        Ok(lecture)
    }

    async fn update(&self, id: LectureId, draft: LectureDraft) -> Result<Lecture, Error> {
        self.require_lecture(id).await?;
        self.check_owner(Some(id), draft.user_id).await?;
        self.lectures
            .update(id, &draft)
            .await
            .map_err(map_lecture_error)?
            .ok_or_else(|| lecture_not_found(id))
    }

    async fn delete(&self, id: LectureId) -> Result<(), Error> {
        if !self.lectures.delete(id).await.map_err(map_lecture_error)? {
            return Err(lecture_not_found(id));
        }
        info!(lecture_id = %id, "lecture deleted");
        Ok(())
    }
}

#[async_trait]
impl<L, U> LectureQuery for LectureService<L, U>
where
    L: LectureRepository,
    U: UserRepository,
{
    async fn find_by_id(&self, id: LectureId) -> Result<Lecture, Error> {
        self.require_lecture(id).await
    }

    async fn find_by_name(&self, name: String) -> Result<Vec<Lecture>, Error> {
        self.lectures
            .find_by_name(name.trim())
            .await
            .map_err(map_lecture_error)
    }

    async fn find_by_user_id(&self, user_id: UserId) -> Result<Lecture, Error> {
        self.lectures
            .find_by_user_id(user_id)
            .await
            .map_err(map_lecture_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} owns no lecture")))
    }
}
