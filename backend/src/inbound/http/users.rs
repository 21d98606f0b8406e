//! User maintenance handlers.
//!
//! ```text
//! POST   /api/v1/user                      (same body as /auth/register)
//! GET    /api/v1/user?id=3
//! PUT    /api/v1/user?id=3                 {"name":..,"email":..,"role":..,"npm":..,"class_id":..}
//! PUT    /api/v1/user/email?id=3           {"email":"new@x.com"}
//! PUT    /api/v1/user/password?id=3        {"recent_password":..,"new_password":..}
//! DELETE /api/v1/user?id=3                 {"password":..}
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{
    ClassId, EmailAddress, Error, Npm, Password, PasswordChange, PersonName, Registration, Role,
    User, UserId, UserProfile,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::RegisterRequest;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::envelope::{Acknowledgement, Envelope};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::query::IdQuery;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_field, invalid_field_as, missing_field_error,
};

/// Profile fields shared by registration and profile updates.
///
/// Students must send `npm` and `class_id`; other roles may omit them.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ProfileRequest {
    #[serde(default)]
    #[schema(example = "Student One")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "a@x.com")]
    pub email: String,
    /// `student`, `lecturer` or `admin` (Indonesian labels are accepted).
    #[serde(default)]
    #[schema(example = "student")]
    pub role: String,
    #[serde(default)]
    #[schema(example = "111")]
    pub npm: Option<String>,
    #[serde(default)]
    #[schema(example = 1)]
    pub class_id: Option<i64>,
}

impl TryFrom<ProfileRequest> for UserProfile {
    type Error = Error;

    fn try_from(value: ProfileRequest) -> Result<Self, Self::Error> {
        let name = PersonName::new(&value.name).map_err(invalid_field)?;
        let email = EmailAddress::new(&value.email).map_err(invalid_field)?;
        if value.role.trim().is_empty() {
            return Err(missing_field_error(FieldName::new("role")));
        }
        let role: Role = value.role.parse().map_err(invalid_field)?;
        let npm = Npm::parse_optional(value.npm.as_deref()).map_err(invalid_field)?;
        let class_id = value.class_id.map(ClassId::new);
        UserProfile::try_new(name, email, role, npm, class_id).map_err(invalid_field)
    }
}

/// Body for `PUT /api/v1/user/email`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ChangeEmailRequest {
    #[serde(default)]
    #[schema(example = "new@x.com")]
    pub email: String,
}

/// Body for `PUT /api/v1/user/password`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub recent_password: String,
    #[serde(default)]
    pub new_password: String,
}

impl TryFrom<ChangePasswordRequest> for PasswordChange {
    type Error = Error;

    fn try_from(value: ChangePasswordRequest) -> Result<Self, Self::Error> {
        let current = Password::confirmation(&value.recent_password)
            .map_err(|err| invalid_field_as(FieldName::new("recent_password"), err))?;
        let replacement = Password::new(&value.new_password)
            .map_err(|err| invalid_field_as(FieldName::new("new_password"), err))?;
        Ok(Self {
            current,
            replacement,
        })
    }
}

/// Body for `DELETE /api/v1/user`: the account password as confirmation.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DeleteUserRequest {
    #[serde(default, alias = "confirm_password")]
    pub password: String,
}

/// Create an account on behalf of someone else.
#[utoipa::path(
    post,
    path = "/api/v1/user",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User created", body = Envelope<User>),
        (status = 400, description = "Invalid field or value already in use", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "Referenced class does not exist", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security(("bearer" = []))
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    actor: AuthenticatedUser,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<Envelope<User>>> {
    let registration = Registration::try_from(payload.into_inner())?;
    let user = state.auth.register(registration).await?;
    info!(actor = %actor.user_id(), user_id = %user.id, "user created by operator");
    Ok(Envelope::ok("user created", user))
}

#[utoipa::path(
    get,
    path = "/api/v1/user",
    params(IdQuery),
    responses(
        (status = 200, description = "User", body = Envelope<User>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "No such user", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security(("bearer" = []))
)]
#[get("/user")]
pub async fn get_user(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    query: web::Query<IdQuery>,
) -> ApiResult<web::Json<Envelope<User>>> {
    let user = state.users_query.find_by_id(UserId::new(query.id)).await?;
    Ok(Envelope::ok("user found", user))
}

/// Replace a user's profile.
///
/// Keeping the current e-mail or NPM is allowed; taking another account's
/// value is `ERR_ALREADY_USE`.
#[utoipa::path(
    put,
    path = "/api/v1/user",
    params(IdQuery),
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "User updated", body = Envelope<User>),
        (status = 400, description = "Invalid field or value already in use", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "No such user or class", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "updateUser",
    security(("bearer" = []))
)]
#[put("/user")]
pub async fn update_user(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    query: web::Query<IdQuery>,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<Envelope<User>>> {
    let profile = UserProfile::try_from(payload.into_inner())?;
    let user = state.users.update(UserId::new(query.id), profile).await?;
    Ok(Envelope::ok("user updated", user))
}

/// Move an account to a new e-mail address.
#[utoipa::path(
    put,
    path = "/api/v1/user/email",
    params(IdQuery),
    request_body = ChangeEmailRequest,
    responses(
        (status = 200, description = "E-mail changed", body = Envelope<User>),
        (status = 400, description = "Invalid, unchanged or already used e-mail", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "No such user", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "changeUserEmail",
    security(("bearer" = []))
)]
#[put("/user/email")]
pub async fn change_email(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    query: web::Query<IdQuery>,
    payload: web::Json<ChangeEmailRequest>,
) -> ApiResult<web::Json<Envelope<User>>> {
    let email = EmailAddress::new(&payload.email).map_err(invalid_field)?;
    let user = state
        .users
        .change_email(UserId::new(query.id), email)
        .await?;
    Ok(Envelope::ok("email changed", user))
}

#[utoipa::path(
    put,
    path = "/api/v1/user/password",
    params(IdQuery),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = Acknowledgement),
        (status = 400, description = "Invalid field or wrong current password", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "No such user", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "changeUserPassword",
    security(("bearer" = []))
)]
#[put("/user/password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    query: web::Query<IdQuery>,
    payload: web::Json<ChangePasswordRequest>,
) -> ApiResult<web::Json<Acknowledgement>> {
    let change = PasswordChange::try_from(payload.into_inner())?;
    state
        .users
        .change_password(UserId::new(query.id), change)
        .await?;
    Ok(Acknowledgement::ok("password changed"))
}

/// Delete an account after confirming its password.
#[utoipa::path(
    delete,
    path = "/api/v1/user",
    params(IdQuery),
    request_body = DeleteUserRequest,
    responses(
        (status = 200, description = "User deleted", body = Acknowledgement),
        (status = 400, description = "Wrong password", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "No such user", body = ErrorEnvelope),
        (status = 409, description = "Lecture still has rooms", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "deleteUser",
    security(("bearer" = []))
)]
#[delete("/user")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    actor: AuthenticatedUser,
    query: web::Query<IdQuery>,
    payload: web::Json<DeleteUserRequest>,
) -> ApiResult<web::Json<Acknowledgement>> {
    let password = Password::confirmation(&payload.password).map_err(invalid_field)?;
    let id = UserId::new(query.id);
    state.users.delete(id, password).await?;
    info!(actor = %actor.user_id(), user_id = %id, "user deleted");
    Ok(Acknowledgement::ok("user deleted"))
}

#[cfg(test)]
mod tests;
