//! Driving ports for rooms.

use async_trait::async_trait;

use crate::domain::{Error, Room, RoomDraft, RoomId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomCommand: Send + Sync {
    async fn create(&self, draft: RoomDraft) -> Result<Room, Error>;

    async fn update(&self, id: RoomId, draft: RoomDraft) -> Result<Room, Error>;

    async fn delete(&self, id: RoomId) -> Result<(), Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomQuery: Send + Sync {
    async fn find_by_id(&self, id: RoomId) -> Result<Room, Error>;
}
