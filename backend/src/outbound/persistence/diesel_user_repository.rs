//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::dsl::now;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{ClassId, EmailAddress, Npm, PasswordHash, User, UserId, UserProfile};

use super::diesel_support::{convert_row, map_diesel_error, map_pool_error, query_optional};
use super::models::{LectureValues, UserProfileUpdate, UserRow};
use super::pool::DbPool;
use super::schema::{lecture, users};

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        query_optional!(self, users::table, users::id.eq(id.get()), UserRow)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        query_optional!(self, users::table, users::email.eq(email.as_str()), UserRow)
    }

    async fn find_by_npm(&self, npm: &Npm) -> Result<Option<User>, UserRepositoryError> {
        query_optional!(self, users::table, users::npm.eq(npm.as_str()), UserRow)
    }

    async fn count_by_class(&self, class_id: ClassId) -> Result<u64, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = users::table
            .filter(users::class_id.eq(class_id.get()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn password_hash(
        &self,
        id: UserId,
    ) -> Result<Option<PasswordHash>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let digest: Option<String> = users::table
            .filter(users::id.eq(id.get()))
            .select(users::password_hash)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(digest.map(PasswordHash::new))
    }

    /// Writes the profile and reconciles the companion lecture in one
    /// transaction: lecturers get one named after them, other roles lose it.
    /// Rooms still scheduled on a dropped lecture fail the whole update.
    async fn update_profile(
        &self,
        id: UserId,
        profile: &UserProfile,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = UserProfileUpdate {
            name: profile.name.as_str(),
            email: profile.email.as_str(),
            role: profile.role.as_str(),
            npm: profile.npm.as_ref().map(Npm::as_str),
            class_id: profile.class_id.map(ClassId::get),
        };
        let owns_lecture = profile.role.owns_lecture();

        let row: Option<UserRow> = conn
            .transaction(|conn| {
                async move {
                    let row = diesel::update(users::table.filter(users::id.eq(id.get())))
                        .set((&changes, users::updated_at.eq(now)))
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()?;
                    if row.is_none() {
                        return Ok(None);
                    }
                    if owns_lecture {
                        diesel::insert_into(lecture::table)
                            .values(&LectureValues {
                                name: changes.name,
                                user_id: id.get(),
                            })
                            .on_conflict(lecture::user_id)
                            .do_update()
                            .set(lecture::name.eq(changes.name))
                            .execute(conn)
                            .await?;
                    } else {
                        let removed =
                            diesel::delete(lecture::table.filter(lecture::user_id.eq(id.get())))
                                .execute(conn)
                                .await?;
                        if removed > 0 {
                            debug!(user_id = id.get(), "lecture dropped with lecturer role");
                        }
                    }
                    Ok::<_, diesel::result::Error>(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        row.map(convert_row).transpose()
    }

    async fn update_email(
        &self,
        id: UserId,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = diesel::update(users::table.filter(users::id.eq(id.get())))
            .set((users::email.eq(email.as_str()), users::updated_at.eq(now)))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(convert_row).transpose()
    }

    async fn update_password(
        &self,
        id: UserId,
        hash: &PasswordHash,
    ) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(users::table.filter(users::id.eq(id.get())))
            .set((
                users::password_hash.eq(hash.as_str()),
                users::updated_at.eq(now),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    /// Removes the owned lecture first; rooms still scheduled on it make the
    /// whole delete fail with a foreign key violation.
    async fn delete(&self, id: UserId) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(lecture::table.filter(lecture::user_id.eq(id.get())))
                        .execute(conn)
                        .await?;
                    diesel::delete(users::table.filter(users::id.eq(id.get())))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
