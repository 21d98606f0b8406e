//! Lecture handlers.
//!
//! ```text
//! POST   /api/v1/lecture          {"name":"Dr. Ada Lovelace","user_id":12}
//! PUT    /api/v1/lecture?id=3     {"name":"Dr. Ada Lovelace","user_id":12}
//! DELETE /api/v1/lecture?id=3
//! GET    /api/v1/lecture?id=3 | ?user_id=12 | ?name=ada
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Lecture, LectureDraft, LectureId, LectureName, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::envelope::{Acknowledgement, Envelope};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::query::IdQuery;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field, missing_field_error, require};

/// Body for creating or updating a lecture.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LectureRequest {
    #[serde(default)]
    #[schema(example = "Dr. Ada Lovelace")]
    pub name: String,
    /// Owning lecturer account.
    #[schema(example = 12)]
    pub user_id: Option<i64>,
}

impl TryFrom<LectureRequest> for LectureDraft {
    type Error = Error;

    fn try_from(value: LectureRequest) -> Result<Self, Self::Error> {
        let name = LectureName::new(&value.name).map_err(invalid_field)?;
        let user_id = require(value.user_id, FieldName::new("user_id"))?;
        Ok(Self {
            name,
            user_id: UserId::new(user_id),
        })
    }
}

/// Selects lectures by `id`, owning `user_id` or a `name` fragment, in that
/// order of precedence.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LectureLookup {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub name: Option<String>,
}

/// A single lecture for id lookups, a list for name searches.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum LectureLookupResult {
    One(Lecture),
    Many(Vec<Lecture>),
}

#[utoipa::path(
    post,
    path = "/api/v1/lecture",
    request_body = LectureRequest,
    responses(
        (status = 200, description = "Lecture created", body = Envelope<Lecture>),
        (status = 400, description = "Invalid field or user already owns a lecture", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "No such user", body = ErrorEnvelope)
    ),
    tags = ["lectures"],
    operation_id = "createLecture",
    security(("bearer" = []))
)]
#[post("/lecture")]
pub async fn create_lecture(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    payload: web::Json<LectureRequest>,
) -> ApiResult<web::Json<Envelope<Lecture>>> {
    let draft = LectureDraft::try_from(payload.into_inner())?;
    let lecture = state.lectures.create(draft).await?;
    Ok(Envelope::ok("lecture created", lecture))
}

#[utoipa::path(
    put,
    path = "/api/v1/lecture",
    params(IdQuery),
    request_body = LectureRequest,
    responses(
        (status = 200, description = "Lecture updated", body = Envelope<Lecture>),
        (status = 400, description = "Invalid field or user already owns a lecture", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "No such lecture or user", body = ErrorEnvelope)
    ),
    tags = ["lectures"],
    operation_id = "updateLecture",
    security(("bearer" = []))
)]
#[put("/lecture")]
pub async fn update_lecture(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    query: web::Query<IdQuery>,
    payload: web::Json<LectureRequest>,
) -> ApiResult<web::Json<Envelope<Lecture>>> {
    let draft = LectureDraft::try_from(payload.into_inner())?;
    let lecture = state
        .lectures
        .update(LectureId::new(query.id), draft)
        .await?;
    Ok(Envelope::ok("lecture updated", lecture))
}

#[utoipa::path(
    delete,
    path = "/api/v1/lecture",
    params(IdQuery),
    responses(
        (status = 200, description = "Lecture deleted", body = Acknowledgement),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "No such lecture", body = ErrorEnvelope),
        (status = 409, description = "Rooms still reference the lecture", body = ErrorEnvelope)
    ),
    tags = ["lectures"],
    operation_id = "deleteLecture",
    security(("bearer" = []))
)]
#[delete("/lecture")]
pub async fn delete_lecture(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    query: web::Query<IdQuery>,
) -> ApiResult<web::Json<Acknowledgement>> {
    state.lectures.delete(LectureId::new(query.id)).await?;
    Ok(Acknowledgement::ok("lecture deleted"))
}

#[utoipa::path(
    get,
    path = "/api/v1/lecture",
    params(LectureLookup),
    responses(
        (status = 200, description = "Lecture, or matching lectures for a name search", body = Envelope<LectureLookupResult>),
        (status = 400, description = "No selector given", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "No such lecture", body = ErrorEnvelope)
    ),
    tags = ["lectures"],
    operation_id = "getLecture",
    security(("bearer" = []))
)]
#[get("/lecture")]
pub async fn get_lecture(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    query: web::Query<LectureLookup>,
) -> ApiResult<web::Json<Envelope<LectureLookupResult>>> {
    let LectureLookup { id, user_id, name } = query.into_inner();
    let result = match (id, user_id, name) {
        (Some(id), _, _) => LectureLookupResult::One(
            state.lectures_query.find_by_id(LectureId::new(id)).await?,
        ),
        (None, Some(user_id), _) => LectureLookupResult::One(
            state
                .lectures_query
                .find_by_user_id(UserId::new(user_id))
                .await?,
        ),
        (None, None, Some(name)) => {
            LectureLookupResult::Many(state.lectures_query.find_by_name(name).await?)
        }
        (None, None, None) => return Err(missing_field_error(FieldName::new("id"))),
    };
    Ok(Envelope::ok("lecture found", result))
}
