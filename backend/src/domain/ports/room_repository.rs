//! Port for room persistence.
use async_trait::async_trait;

use crate::domain::{Room, RoomDraft, RoomId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by room repository adapters.
    pub enum RoomRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "room repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "room repository query failed: {message}",
        /// A unique constraint rejected the write.
        Duplicate { constraint: String } => "room repository unique constraint violated: {constraint}",
        /// A foreign key constraint rejected the write.
        Referenced { constraint: String } => "room repository foreign key violated: {constraint}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn insert(&self, room: &RoomDraft) -> Result<Room, RoomRepositoryError>;

    async fn update(
        &self,
        id: RoomId,
        room: &RoomDraft,
    ) -> Result<Option<Room>, RoomRepositoryError>;

    async fn delete(&self, id: RoomId) -> Result<bool, RoomRepositoryError>;

    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>, RoomRepositoryError>;
}
