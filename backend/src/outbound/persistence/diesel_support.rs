//! Shared Diesel helpers for the campus repositories.
//!
//! Every repository port error has the same four shapes, so one mapping
//! serves them all through [`RepositoryError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{
    AccountRepositoryError, ClassRepositoryError, CourseRepositoryError, LectureRepositoryError,
    RoomRepositoryError, UserRepositoryError,
};

use super::pool::PoolError;

/// Constructors shared by the repository port errors.
pub(crate) trait RepositoryError: Sized {
    fn from_connection(message: String) -> Self;
    fn from_query(message: String) -> Self;
    fn from_duplicate(constraint: String) -> Self;
    fn from_referenced(constraint: String) -> Self;
}

macro_rules! impl_repository_error {
    ($($error:ident),* $(,)?) => {
        $(
            impl RepositoryError for $error {
                fn from_connection(message: String) -> Self {
                    $error::connection(message)
                }

                fn from_query(message: String) -> Self {
                    $error::query(message)
                }

                fn from_duplicate(constraint: String) -> Self {
                    $error::duplicate(constraint)
                }

                fn from_referenced(constraint: String) -> Self {
                    $error::referenced(constraint)
                }
            }
        )*
    };
}

impl_repository_error!(
    UserRepositoryError,
    AccountRepositoryError,
    ClassRepositoryError,
    LectureRepositoryError,
    RoomRepositoryError,
    CourseRepositoryError,
);

/// Pool checkout and build failures are connection problems.
pub(crate) fn map_pool_error<E: RepositoryError>(error: PoolError) -> E {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            E::from_connection(message)
        }
    }
}

/// Map a Diesel error onto the port error taxonomy.
///
/// Unique and foreign key violations keep their constraint name so services
/// can tell callers which field collided.
pub(crate) fn map_diesel_error<E: RepositoryError>(error: DieselError) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            E::from_duplicate(constraint_or(info.constraint_name(), "unique"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            E::from_referenced(constraint_or(info.constraint_name(), "foreign_key"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            E::from_connection("database connection error".to_owned())
        }
        DieselError::NotFound => E::from_query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => E::from_query("database query error".to_owned()),
        _ => E::from_query("database error".to_owned()),
    }
}

/// Convert a stored row into its domain type; a corrupt row is a query error.
pub(crate) fn convert_row<R, T, E>(row: R) -> Result<T, E>
where
    T: TryFrom<R, Error = String>,
    E: RepositoryError,
{
    T::try_from(row).map_err(E::from_query)
}

/// Single-row lookup: check out a connection, run the filtered select and
/// convert the row.
macro_rules! query_optional {
    ($self:ident, $table:expr, $filter:expr, $row_type:ty) => {{
        let mut conn = $self
            .pool
            .get()
            .await
            .map_err($crate::outbound::persistence::diesel_support::map_pool_error)?;
        let row: Option<$row_type> = $table
            .filter($filter)
            .select(<$row_type>::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err($crate::outbound::persistence::diesel_support::map_diesel_error)?;
        row.map($crate::outbound::persistence::diesel_support::convert_row)
            .transpose()
    }};
}

pub(crate) use query_optional;

fn constraint_or(name: Option<&str>, fallback: &str) -> String {
    name.unwrap_or(fallback).to_owned()
}

/// Escape `%`, `_` and `\` so user input matches literally inside `ILIKE`.
pub(crate) fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
