//! Course ("mata kuliah") handlers mounted under `/api/v1/matkul`.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Course, CourseDraft, CourseId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::envelope::{Acknowledgement, Envelope};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::query::IdQuery;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field, missing_field_error};

/// Body for creating or updating a course.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CourseRequest {
    #[serde(default)]
    #[schema(example = "Struktur Data")]
    pub name: String,
    /// Stored upper-case.
    #[serde(default)]
    #[schema(example = "IF201")]
    pub kode_matkul: String,
}

impl TryFrom<CourseRequest> for CourseDraft {
    type Error = Error;

    fn try_from(value: CourseRequest) -> Result<Self, Self::Error> {
        CourseDraft::try_new(&value.name, &value.kode_matkul).map_err(invalid_field)
    }
}

/// Selects a course by `id`, or searches by `name` fragment.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseLookup {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// A single course for id lookups, a list for name searches.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CourseLookupResult {
    One(Course),
    Many(Vec<Course>),
}

#[utoipa::path(
    post,
    path = "/api/v1/matkul",
    request_body = CourseRequest,
    responses(
        (status = 200, description = "Course created", body = Envelope<Course>),
        (status = 400, description = "Invalid field or course code already in use", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope)
    ),
    tags = ["courses"],
    operation_id = "createCourse",
    security(("bearer" = []))
)]
#[post("/matkul")]
pub async fn create_course(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    payload: web::Json<CourseRequest>,
) -> ApiResult<web::Json<Envelope<Course>>> {
    let draft = CourseDraft::try_from(payload.into_inner())?;
    let course = state.courses.create(draft).await?;
    Ok(Envelope::ok("course created", course))
}

#[utoipa::path(
    put,
    path = "/api/v1/matkul",
    params(IdQuery),
    request_body = CourseRequest,
    responses(
        (status = 200, description = "Course updated", body = Envelope<Course>),
        (status = 400, description = "Invalid field or course code already in use", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "No such course", body = ErrorEnvelope)
    ),
    tags = ["courses"],
    operation_id = "updateCourse",
    security(("bearer" = []))
)]
#[put("/matkul")]
pub async fn update_course(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    query: web::Query<IdQuery>,
    payload: web::Json<CourseRequest>,
) -> ApiResult<web::Json<Envelope<Course>>> {
    let draft = CourseDraft::try_from(payload.into_inner())?;
    let course = state.courses.update(CourseId::new(query.id), draft).await?;
    Ok(Envelope::ok("course updated", course))
}

#[utoipa::path(
    delete,
    path = "/api/v1/matkul",
    params(IdQuery),
    responses(
        (status = 200, description = "Course deleted", body = Acknowledgement),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "No such course", body = ErrorEnvelope)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse",
    security(("bearer" = []))
)]
#[delete("/matkul")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    query: web::Query<IdQuery>,
) -> ApiResult<web::Json<Acknowledgement>> {
    state.courses.delete(CourseId::new(query.id)).await?;
    Ok(Acknowledgement::ok("course deleted"))
}

#[utoipa::path(
    get,
    path = "/api/v1/matkul",
    params(CourseLookup),
    responses(
        (status = 200, description = "Course, or matching courses for a name search", body = Envelope<CourseLookupResult>),
        (status = 400, description = "Neither id nor name given", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "No such course", body = ErrorEnvelope)
    ),
    tags = ["courses"],
    operation_id = "getCourse",
    security(("bearer" = []))
)]
#[get("/matkul")]
pub async fn get_course(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    query: web::Query<CourseLookup>,
) -> ApiResult<web::Json<Envelope<CourseLookupResult>>> {
    let CourseLookup { id, name } = query.into_inner();
    let result = match (id, name) {
        (Some(id), _) => {
            CourseLookupResult::One(state.courses_query.find_by_id(CourseId::new(id)).await?)
        }
        (None, Some(name)) => {
            CourseLookupResult::Many(state.courses_query.search_by_name(name).await?)
        }
        (None, None) => return Err(missing_field_error(FieldName::new("id"))),
    };
    Ok(Envelope::ok("course found", result))
}
