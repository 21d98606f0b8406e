//! PostgreSQL-backed `LectureRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{LectureRepository, LectureRepositoryError};
use crate::domain::{Lecture, LectureDraft, LectureId, UserId};

use super::diesel_support::{
    contains_pattern, convert_row, map_diesel_error, map_pool_error, query_optional,
};
use super::models::{LectureRow, LectureValues};
use super::pool::DbPool;
use super::schema::lecture;

/// Diesel implementation of [`LectureRepository`].
#[derive(Clone)]
pub struct DieselLectureRepository {
    pool: DbPool,
}

impl DieselLectureRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn values(draft: &LectureDraft) -> LectureValues<'_> {
    LectureValues {
        name: draft.name.as_str(),
        user_id: draft.user_id.get(),
    }
}

#[async_trait]
impl LectureRepository for DieselLectureRepository {
    async fn insert(&self, draft: &LectureDraft) -> Result<Lecture, LectureRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let values = values(draft);
        let row: LectureRow = conn
            .transaction(|conn| {
                async move {
                    diesel::insert_into(lecture::table)
                        .values(&values)
                        .returning(LectureRow::as_returning())
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
        id: LectureId,
        draft: &LectureDraft,
    ) -> Result<Option<Lecture>, LectureRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<LectureRow> =
            diesel::update(lecture::table.filter(lecture::id.eq(id.get())))
                .set(&values(draft))
                .returning(LectureRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
        row.map(convert_row).transpose()
    }

    async fn delete(&self, id: LectureId) -> Result<bool, LectureRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(lecture::table.filter(lecture::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn find_by_id(&self, id: LectureId) -> Result<Option<Lecture>, LectureRepositoryError> {
        query_optional!(self, lecture::table, lecture::id.eq(id.get()), LectureRow)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Lecture>, LectureRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<LectureRow> = lecture::table
            .filter(lecture::name.ilike(contains_pattern(name)))
            .select(LectureRow::as_select())
            .order_by(lecture::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(convert_row).collect()
    }

    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<Lecture>, LectureRepositoryError> {
        query_optional!(
            self,
            lecture::table,
            lecture::user_id.eq(user_id.get()),
            LectureRow
        )
    }
}
