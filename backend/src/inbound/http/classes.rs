//! Class handlers.
//!
//! ```text
//! POST   /api/v1/class            {"name":"TI-3A"}
//! PUT    /api/v1/class?id=1       {"name":"TI-3B"}
//! DELETE /api/v1/class?id=1
//! GET    /api/v1/class?id=1 | /api/v1/class?name=TI-3A
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Class, ClassDraft, ClassId, ClassName, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::envelope::{Acknowledgement, Envelope};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::query::IdQuery;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field, missing_field_error};

/// Body for creating or renaming a class.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ClassRequest {
    #[serde(default)]
    #[schema(example = "TI-3A")]
    pub name: String,
}

impl TryFrom<ClassRequest> for ClassDraft {
    type Error = Error;

    fn try_from(value: ClassRequest) -> Result<Self, Self::Error> {
        let name = ClassName::new(&value.name).map_err(invalid_field)?;
        Ok(Self { name })
    }
}

/// Selects a class by `id` or, failing that, by exact `name`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClassLookup {
    pub id: Option<i64>,
    pub name: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/class",
    request_body = ClassRequest,
    responses(
        (status = 200, description = "Class created with a fresh join code", body = Envelope<Class>),
        (status = 400, description = "Invalid or already used name", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope)
    ),
    tags = ["classes"],
    operation_id = "createClass",
    security(("bearer" = []))
)]
#[post("/class")]
pub async fn create_class(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    payload: web::Json<ClassRequest>,
) -> ApiResult<web::Json<Envelope<Class>>> {
    let draft = ClassDraft::try_from(payload.into_inner())?;
    let class = state.classes.create(draft).await?;
    Ok(Envelope::ok("class created", class))
}

#[utoipa::path(
    put,
    path = "/api/v1/class",
    params(IdQuery),
    request_body = ClassRequest,
    responses(
        (status = 200, description = "Class renamed", body = Envelope<Class>),
        (status = 400, description = "Invalid or already used name", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "No such class", body = ErrorEnvelope)
    ),
    tags = ["classes"],
    operation_id = "updateClass",
    security(("bearer" = []))
)]
#[put("/class")]
pub async fn update_class(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    query: web::Query<IdQuery>,
    payload: web::Json<ClassRequest>,
) -> ApiResult<web::Json<Envelope<Class>>> {
    let draft = ClassDraft::try_from(payload.into_inner())?;
    let class = state.classes.update(ClassId::new(query.id), draft).await?;
    Ok(Envelope::ok("class updated", class))
}

/// Delete a class nobody is enrolled in.
#[utoipa::path(
    delete,
    path = "/api/v1/class",
    params(IdQuery),
    responses(
        (status = 200, description = "Class deleted", body = Acknowledgement),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "No such class", body = ErrorEnvelope),
        (status = 409, description = "Users are still enrolled", body = ErrorEnvelope)
    ),
    tags = ["classes"],
    operation_id = "deleteClass",
    security(("bearer" = []))
)]
#[delete("/class")]
pub async fn delete_class(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    query: web::Query<IdQuery>,
) -> ApiResult<web::Json<Acknowledgement>> {
    state.classes.delete(ClassId::new(query.id)).await?;
    Ok(Acknowledgement::ok("class deleted"))
}

#[utoipa::path(
    get,
    path = "/api/v1/class",
    params(ClassLookup),
    responses(
        (status = 200, description = "Class", body = Envelope<Class>),
        (status = 400, description = "Neither id nor name given", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "No such class", body = ErrorEnvelope)
    ),
    tags = ["classes"],
    operation_id = "getClass",
    security(("bearer" = []))
)]
#[get("/class")]
pub async fn get_class(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    query: web::Query<ClassLookup>,
) -> ApiResult<web::Json<Envelope<Class>>> {
    let ClassLookup { id, name } = query.into_inner();
    let class = match (id, name) {
        (Some(id), _) => state.classes_query.find_by_id(ClassId::new(id)).await?,
        (None, Some(name)) => {
            let name = ClassName::new(&name).map_err(invalid_field)?;
            state.classes_query.find_by_name(name).await?
        }
        (None, None) => return Err(missing_field_error(FieldName::new("id"))),
    };
    Ok(Envelope::ok("class found", class))
}
