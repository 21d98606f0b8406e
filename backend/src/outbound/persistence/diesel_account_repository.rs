//! PostgreSQL-backed `AccountRepository`.
//!
//! Registration inserts the user row and, for lecturers, the companion
//! lecture row inside one transaction so a failure in either leaves nothing
//! behind.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{
    ClassId, EmailAddress, NewAccount, Npm, PasswordHash, StoredCredentials, User,
};

use super::diesel_support::{convert_row, map_diesel_error, map_pool_error};
use super::models::{LectureValues, NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::{lecture, users};

/// Diesel implementation of [`AccountRepository`].
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn create(&self, account: &NewAccount) -> Result<User, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let profile = &account.profile;
        let new_row = NewUserRow {
            name: profile.name.as_str(),
            email: profile.email.as_str(),
            password_hash: account.password_hash.as_str(),
            role: profile.role.as_str(),
            npm: profile.npm.as_ref().map(Npm::as_str),
            class_id: profile.class_id.map(ClassId::get),
        };
        let owns_lecture = profile.role.owns_lecture();

        let row: UserRow = conn
            .transaction(|conn| {
                async move {
                    let row: UserRow = diesel::insert_into(users::table)
                        .values(&new_row)
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await?;
                    if owns_lecture {
                        diesel::insert_into(lecture::table)
                            .values(&LectureValues {
                                name: new_row.name,
                                user_id: row.id,
                            })
                            .execute(conn)
                            .await?;
                        debug!(user_id = row.id, "companion lecture inserted");
                    }
                    Ok::<_, diesel::result::Error>(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        convert_row(row)
    }

    async fn find_credentials(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredCredentials>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let found: Option<(UserRow, String)> = users::table
            .filter(users::email.eq(email.as_str()))
            .select((UserRow::as_select(), users::password_hash))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        found
            .map(|(row, digest)| {
                convert_row(row).map(|user| StoredCredentials {
                    user,
                    password_hash: PasswordHash::new(digest),
                })
            })
            .transpose()
    }
}
