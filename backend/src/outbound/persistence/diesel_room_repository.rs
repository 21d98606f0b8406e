//! PostgreSQL-backed `RoomRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{RoomRepository, RoomRepositoryError};
use crate::domain::{Room, RoomDraft, RoomId};

use super::diesel_support::{convert_row, map_diesel_error, map_pool_error, query_optional};
use super::models::{RoomRow, RoomValues};
use super::pool::DbPool;
use super::schema::room;

/// Diesel implementation of [`RoomRepository`].
#[derive(Clone)]
pub struct DieselRoomRepository {
    pool: DbPool,
}

impl DieselRoomRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn values(draft: &RoomDraft) -> RoomValues<'_> {
    RoomValues {
        name: &draft.name,
        url: &draft.url,
        lecture_id: draft.lecture_id.get(),
        start_room: draft.schedule.start(),
        end_room: draft.schedule.end(),
    }
}

#[async_trait]
impl RoomRepository for DieselRoomRepository {
    async fn insert(&self, draft: &RoomDraft) -> Result<Room, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let values = values(draft);
        let row: RoomRow = conn
            .transaction(|conn| {
                async move {
                    diesel::insert_into(room::table)
                        .values(&values)
                        .returning(RoomRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        convert_row(row)
    }

    async fn update(
        &self,
        id: RoomId,
        draft: &RoomDraft,
    ) -> Result<Option<Room>, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<RoomRow> = diesel::update(room::table.filter(room::id.eq(id.get())))
            .set(&values(draft))
            .returning(RoomRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(convert_row).transpose()
    }

    async fn delete(&self, id: RoomId) -> Result<bool, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(room::table.filter(room::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>, RoomRepositoryError> {
        query_optional!(self, room::table, room::id.eq(id.get()), RoomRow)
    }
}
