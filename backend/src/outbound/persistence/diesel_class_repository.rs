//! PostgreSQL-backed `ClassRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{ClassRepository, ClassRepositoryError};
use crate::domain::{Class, ClassId, ClassName, NewClass};

use super::diesel_support::{convert_row, map_diesel_error, map_pool_error, query_optional};
use super::models::{ClassRow, NewClassRow};
use super::pool::DbPool;
use super::schema::class;

/// Diesel implementation of [`ClassRepository`].
#[derive(Clone)]
pub struct DieselClassRepository {
    pool: DbPool,
}

impl DieselClassRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassRepository for DieselClassRepository {
    async fn insert(&self, new_class: &NewClass) -> Result<Class, ClassRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let values = NewClassRow {
            name: new_class.name.as_str(),
            join_code: new_class.join_code.as_str(),
        };
        let row: ClassRow = conn
            .transaction(|conn| {
                async move {
                    diesel::insert_into(class::table)
                        .values(&values)
                        .returning(ClassRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        convert_row(row)
    }

    async fn rename(
        &self,
        id: ClassId,
        name: &ClassName,
    ) -> Result<Option<Class>, ClassRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ClassRow> = diesel::update(class::table.filter(class::id.eq(id.get())))
            .set(class::name.eq(name.as_str()))
            .returning(ClassRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(convert_row).transpose()
    }

    async fn delete(&self, id: ClassId) -> Result<bool, ClassRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(class::table.filter(class::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn find_by_id(&self, id: ClassId) -> Result<Option<Class>, ClassRepositoryError> {
        query_optional!(self, class::table, class::id.eq(id.get()), ClassRow)
    }

    async fn find_by_name(
        &self,
        name: &ClassName,
    ) -> Result<Option<Class>, ClassRepositoryError> {
        query_optional!(self, class::table, class::name.eq(name.as_str()), ClassRow)
    }
}
