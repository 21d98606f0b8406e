//! Room handlers.
//!
//! Room times travel as `YYYY-MM-DD HH:MM:SS` strings.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, LectureId, Room, RoomDraft, RoomId, RoomSchedule};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::envelope::{Acknowledgement, Envelope};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::query::IdQuery;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field, require};

/// Body for creating or updating a room.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RoomRequest {
    #[serde(default)]
    #[schema(example = "Struktur Data - Pertemuan 1")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "https://meet.example.com/abc-defg-hij")]
    pub url: String,
    #[schema(example = 3)]
    pub lecture_id: Option<i64>,
    #[serde(default)]
    #[schema(example = "2024-03-01 08:00:00")]
    pub start_room: String,
    #[serde(default)]
    #[schema(example = "2024-03-01 09:40:00")]
    pub end_room: String,
}

impl TryFrom<RoomRequest> for RoomDraft {
    type Error = Error;

    fn try_from(value: RoomRequest) -> Result<Self, Self::Error> {
        let lecture_id = require(value.lecture_id, FieldName::new("lecture_id"))?;
        let schedule =
            RoomSchedule::parse(&value.start_room, &value.end_room).map_err(invalid_field)?;
        RoomDraft::try_new(
            &value.name,
            &value.url,
            LectureId::new(lecture_id),
            schedule,
        )
        .map_err(invalid_field)
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/room",
    request_body = RoomRequest,
    responses(
        (status = 200, description = "Room created", body = Envelope<Room>),
        (status = 400, description = "Invalid field or schedule", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "No such lecture", body = ErrorEnvelope)
    ),
    tags = ["rooms"],
    operation_id = "createRoom",
    security(("bearer" = []))
)]
#[post("/room")]
pub async fn create_room(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    payload: web::Json<RoomRequest>,
) -> ApiResult<web::Json<Envelope<Room>>> {
    let draft = RoomDraft::try_from(payload.into_inner())?;
    let room = state.rooms.create(draft).await?;
    Ok(Envelope::ok("room created", room))
}

#[utoipa::path(
    put,
    path = "/api/v1/room",
    params(IdQuery),
    request_body = RoomRequest,
    responses(
        (status = 200, description = "Room updated", body = Envelope<Room>),
        (status = 400, description = "Invalid field or schedule", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "No such room or lecture", body = ErrorEnvelope)
    ),
    tags = ["rooms"],
    operation_id = "updateRoom",
    security(("bearer" = []))
)]
#[put("/room")]
pub async fn update_room(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    query: web::Query<IdQuery>,
    payload: web::Json<RoomRequest>,
) -> ApiResult<web::Json<Envelope<Room>>> {
    let draft = RoomDraft::try_from(payload.into_inner())?;
    let room = state.rooms.update(RoomId::new(query.id), draft).await?;
    Ok(Envelope::ok("room updated", room))
}

#[utoipa::path(
    delete,
    path = "/api/v1/room",
    params(IdQuery),
    responses(
        (status = 200, description = "Room deleted", body = Acknowledgement),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "No such room", body = ErrorEnvelope)
    ),
    tags = ["rooms"],
    operation_id = "deleteRoom",
    security(("bearer" = []))
)]
#[delete("/room")]
pub async fn delete_room(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    query: web::Query<IdQuery>,
) -> ApiResult<web::Json<Acknowledgement>> {
    state.rooms.delete(RoomId::new(query.id)).await?;
    Ok(Acknowledgement::ok("room deleted"))
}

#[utoipa::path(
    get,
    path = "/api/v1/room",
    params(IdQuery),
    responses(
        (status = 200, description = "Room", body = Envelope<Room>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorEnvelope),
        (status = 404, description = "No such room", body = ErrorEnvelope)
    ),
    tags = ["rooms"],
    operation_id = "getRoom",
    security(("bearer" = []))
)]
#[get("/room")]
pub async fn get_room(
    state: web::Data<HttpState>,
    _actor: AuthenticatedUser,
    query: web::Query<IdQuery>,
) -> ApiResult<web::Json<Envelope<Room>>> {
    let room = state.rooms_query.find_by_id(RoomId::new(query.id)).await?;
    Ok(Envelope::ok("room found", room))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockRoomCommand, MockRoomQuery};
    use crate::inbound::http::test_utils::{MockPorts, bearer, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn room_body() -> Value {
        json!({
            "name": "Struktur Data - Pertemuan 1",
            "url": "https://meet.example.com/abc",
            "lecture_id": 3,
            "start_room": "2024-03-01 08:00:00",
            "end_room": "2024-03-01 09:40:00"
        })
    }

    async fn send(ports: MockPorts, request: actix_test::TestRequest) -> (StatusCode, Value) {
        let app = actix_test::init_service(test_app(ports)).await;
        let response =
            actix_test::call_service(&app, request.insert_header(bearer()).to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        (status, serde_json::from_slice(&body).expect("json body"))
    }

    #[actix_web::test]
    async fn create_echoes_times_in_the_wire_format() {
        let mut rooms = MockRoomCommand::new();
        rooms
            .expect_create()
            .withf(|draft| draft.lecture_id == LectureId::new(3))
            .return_once(|draft| Ok(Room::from_draft(RoomId::new(5), draft)));
        let ports = MockPorts {
            rooms,
            ..MockPorts::authorised()
        };

        let (status, body) = send(
            ports,
            actix_test::TestRequest::post()
                .uri("/api/v1/room")
                .set_json(room_body()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], json!(5));
        assert_eq!(body["data"]["start_room"], json!("2024-03-01 08:00:00"));
        assert_eq!(body["data"]["end_room"], json!("2024-03-01 09:40:00"));
    }

    #[rstest]
    #[case::no_lecture("lecture_id", Value::Null, "missing_field")]
    #[case::iso_time("start_room", json!("2024-03-01T08:00:00"), "invalid_timestamp")]
    #[case::reversed("end_room", json!("2024-03-01 07:00:00"), "invalid_range")]
    #[case::no_url("url", json!(""), "missing_field")]
    #[actix_web::test]
    async fn invalid_rooms_never_reach_the_service(
        #[case] field: &str,
        #[case] value: Value,
        #[case] code: &str,
    ) {
        let mut body = room_body();
        body[field] = value;
        let mut rooms = MockRoomCommand::new();
        rooms.expect_create().never();
        let ports = MockPorts {
            rooms,
            ..MockPorts::authorised()
        };

        let (status, response) = send(
            ports,
            actix_test::TestRequest::post()
                .uri("/api/v1/room")
                .set_json(body),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["details"], json!({"field": field, "code": code}));
    }

    #[actix_web::test]
    async fn get_missing_room_is_not_found() {
        let mut rooms_query = MockRoomQuery::new();
        rooms_query
            .expect_find_by_id()
            .return_once(|_| Err(Error::not_found("room not found")));
        let ports = MockPorts {
            rooms_query,
            ..MockPorts::authorised()
        };

        let (status, _) = send(
            ports,
            actix_test::TestRequest::get().uri("/api/v1/room?id=9"),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
