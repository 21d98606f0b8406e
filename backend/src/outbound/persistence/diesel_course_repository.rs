//! PostgreSQL-backed `CourseRepository` over the `matakuliah` table.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseDraft, CourseId};

use super::diesel_support::{contains_pattern, map_diesel_error, map_pool_error};
use super::models::{CourseRow, CourseValues};
use super::pool::DbPool;
use super::schema::matakuliah;

/// Diesel implementation of [`CourseRepository`].
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn values(draft: &CourseDraft) -> CourseValues<'_> {
    CourseValues {
        name: &draft.name,
        kode_matkul: &draft.code,
    }
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn insert(&self, draft: &CourseDraft) -> Result<Course, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let values = values(draft);
        let row: CourseRow = conn
            .transaction(|conn| {
                async move {
                    diesel::insert_into(matakuliah::table)
                        .values(&values)
                        .returning(CourseRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(Course::from(row))
    }

    async fn update(
        &self,
        id: CourseId,
        draft: &CourseDraft,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CourseRow> =
            diesel::update(matakuliah::table.filter(matakuliah::id.eq(id.get())))
                .set(&values(draft))
                .returning(CourseRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
        Ok(row.map(Course::from))
    }

    async fn delete(&self, id: CourseId) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(matakuliah::table.filter(matakuliah::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CourseRow> = matakuliah::table
            .filter(matakuliah::id.eq(id.get()))
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Course::from))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CourseRow> = matakuliah::table
            .filter(matakuliah::kode_matkul.eq(code.to_uppercase()))
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Course::from))
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CourseRow> = matakuliah::table
            .filter(matakuliah::name.ilike(contains_pattern(fragment)))
            .select(CourseRow::as_select())
            .order_by(matakuliah::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Course::from).collect())
    }
}
