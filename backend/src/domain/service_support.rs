//! Internal helpers shared by the domain services.

use serde_json::json;
use tracing::warn;

use crate::domain::ports::{
    AccountRepositoryError, ClassRepository, ClassRepositoryError, CourseRepositoryError,
    LectureRepositoryError, PasswordHasherError, RoomRepositoryError, UserRepositoryError,
};
use crate::domain::{Class, ClassId, Error};

/// Friendly message for a unique constraint that slipped past the pre-checks.
fn duplicate_message(constraint: &str) -> &'static str {
    if constraint.contains("email") {
        "email is already in use"
    } else if constraint.contains("npm") {
        "npm is already in use"
    } else if constraint.contains("kode") {
        "course code is already in use"
    } else if constraint.contains("user_id") {
        "user already owns a lecture"
    } else if constraint.contains("name") {
        "name is already in use"
    } else {
        "value is already in use"
    }
}

macro_rules! repository_error_mapping {
    ($($fn_name:ident => $error:ident, $label:literal;)*) => {
        $(
            pub(crate) fn $fn_name(error: $error) -> Error {
                match error {
                    $error::Connection { message } => Error::service_unavailable(format!(
                        "{} repository unavailable: {message}",
                        $label
                    )),
                    $error::Query { message } => {
                        Error::internal(format!("{} repository error: {message}", $label))
                    }
                    $error::Duplicate { constraint } => {
                        warn!(%constraint, repository = $label, "unique constraint caught a concurrent write");
                        Error::already_use(duplicate_message(&constraint))
                            .with_details(json!({ "constraint": constraint }))
                    }
                    $error::Referenced { constraint } => Error::conflict(format!(
                        "{} is still referenced by other records",
                        $label
                    ))
                    .with_details(json!({ "constraint": constraint })),
                }
            }
        )*
    };
}

repository_error_mapping! {
    map_user_error => UserRepositoryError, "user";
    map_account_error => AccountRepositoryError, "account";
    map_class_error => ClassRepositoryError, "class";
    map_lecture_error => LectureRepositoryError, "lecture";
    map_room_error => RoomRepositoryError, "room";
    map_course_error => CourseRepositoryError, "course";
}

pub(crate) fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

/// Resolve an optional class reference, failing with `NOT_FOUND` when the
/// class is missing.
pub(crate) async fn ensure_class_exists<C>(
    classes: &C,
    class_id: Option<ClassId>,
) -> Result<Option<Class>, Error>
where
    C: ClassRepository + ?Sized,
{
    let Some(id) = class_id else {
        return Ok(None);
    };
    match classes.find_by_id(id).await.map_err(map_class_error)? {
        Some(class) => Ok(Some(class)),
        None => Err(Error::not_found(format!("class {id} not found"))
            .with_details(json!({ "field": "class_id" }))),
    }
}
