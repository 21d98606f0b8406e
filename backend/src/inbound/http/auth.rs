//! Registration and login handlers.
//!
//! ```text
//! POST /api/v1/auth/register {"name":"Student One","email":"a@x.com","password":"secret1","role":"student","npm":"111","class_id":1}
//! POST /api/v1/auth/login {"email":"a@x.com","password":"secret1"}
//! ```

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{LoginCredentials, Password, Registration, TOKEN_TTL_HOURS, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::TOKEN_COOKIE;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::ProfileRequest;
use crate::inbound::http::validation::invalid_field;

/// Registration body; also accepted by `POST /api/v1/user`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(flatten)]
    pub profile: ProfileRequest,
    #[serde(default)]
    #[schema(example = "secret1")]
    pub password: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = crate::domain::Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        let profile = value.profile.try_into()?;
        let password = Password::new(&value.password).map_err(invalid_field)?;
        Ok(Self { profile, password })
    }
}

/// Login body for `POST /api/v1/auth/login`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "a@x.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "secret1")]
    pub password: String,
}

/// Token handed back on login; the same value is set in the `token` cookie.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

/// Create an account.
///
/// Lecturer accounts get their lecture record in the same transaction.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = Envelope<User>),
        (status = 400, description = "Invalid field or value already in use", body = ErrorEnvelope),
        (status = 404, description = "Referenced class does not exist", body = ErrorEnvelope),
        (status = 503, description = "Database unavailable", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<Envelope<User>>> {
    let registration = Registration::try_from(payload.into_inner())?;
    let user = state.auth.register(registration).await?;
    Ok(Envelope::ok("user registered", user))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (
            status = 200,
            description = "Login success",
            body = Envelope<LoginResponse>,
            headers(("Set-Cookie" = String, description = "HTTP-only `token` cookie"))
        ),
        (status = 400, description = "Invalid field or wrong credentials", body = ErrorEnvelope),
        (status = 503, description = "Database unavailable", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&email, &password).map_err(invalid_field)?;
    let session = state.auth.login(credentials).await?;

    let token = session.token.as_str().to_owned();
    let cookie = Cookie::build(TOKEN_COOKIE, token.clone())
        .path("/")
        .http_only(true)
        .secure(state.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::hours(TOKEN_TTL_HOURS))
        .finish();
    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(Envelope::ok("login success", LoginResponse { token }).into_inner()))
}
