//! Room scheduling.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{LectureRepository, RoomCommand, RoomQuery, RoomRepository};
use crate::domain::service_support::{map_lecture_error, map_room_error};
use crate::domain::{Error, LectureId, Room, RoomDraft, RoomId};

/// Room service implementing [`RoomCommand`] and [`RoomQuery`].
#[derive(Clone)]
pub struct RoomService<R, L> {
    rooms: Arc<R>,
    lectures: Arc<L>,
}

impl<R, L> RoomService<R, L> {
    pub fn new(rooms: Arc<R>, lectures: Arc<L>) -> Self {
        Self { rooms, lectures }
    }
}

fn room_not_found(id: RoomId) -> Error {
    Error::not_found(format!("room {id} not found"))
}

impl<R, L> RoomService<R, L>
where
    R: RoomRepository,
    L: LectureRepository,
{
    async fn ensure_lecture_exists(&self, id: LectureId) -> Result<(), Error> {
        match self
            .lectures
            .find_by_id(id)
            .await
            .map_err(map_lecture_error)?
        {
            Some(_) => Ok(()),
            None => Err(Error::not_found(format!("lecture {id} not found"))
                .with_details(json!({ "field": "lecture_id" }))),
        }
    }
}

#[async_trait]
impl<R, L> RoomCommand for RoomService<R, L>
where
    R: RoomRepository,
    L: LectureRepository,
{
    async fn create(&self, draft: RoomDraft) -> Result<Room, Error> {
        self.ensure_lecture_exists(draft.lecture_id).await?;
        let room = self.rooms.insert(&draft).await.map_err(map_room_error)?;
        info!(room_id = %room.id, lecture_id = %room.lecture_id, "room scheduled");
        Ok(room)
    }

    async fn update(&self, id: RoomId, draft: RoomDraft) -> Result<Room, Error> {
        if self
            .rooms
            .find_by_id(id)
            .await
            .map_err(map_room_error)?
            .is_none()
        {
            return Err(room_not_found(id));
        }
        self.ensure_lecture_exists(draft.lecture_id).await?;
        self.rooms
            .update(id, &draft)
            .await
            .map_err(map_room_error)?
            .ok_or_else(|| room_not_found(id))
    }

    async fn delete(&self, id: RoomId) -> Result<(), Error> {
        if !self.rooms.delete(id).await.map_err(map_room_error)? {
            return Err(room_not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl<R, L> RoomQuery for RoomService<R, L>
where
    R: RoomRepository,
    L: LectureRepository,
{
    async fn find_by_id(&self, id: RoomId) -> Result<Room, Error> {
        self.rooms
            .find_by_id(id)
            .await
            .map_err(map_room_error)?
            .ok_or_else(|| room_not_found(id))
    }
}
