//! Handler tests for the user endpoints.

use super::*;
use crate::domain::ports::{MockAuthCommand, MockUserCommand, MockUserQuery};
use crate::inbound::http::test_utils::{MockPorts, bearer, test_app};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

fn lecturer(id: i64) -> User {
    User {
        id: UserId::new(id),
        name: PersonName::new("Dr. Ada Lovelace").expect("name"),
        email: EmailAddress::new("ada@campus.ac.id").expect("email"),
        role: Role::Lecturer,
        npm: None,
        class_id: None,
    }
}

async fn send(ports: MockPorts, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(ports)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    (status, serde_json::from_slice(&body).expect("json body"))
}

#[rstest]
#[case::get(actix_test::TestRequest::get().uri("/api/v1/user?id=3"))]
#[case::update(actix_test::TestRequest::put().uri("/api/v1/user?id=3").set_json(json!({})))]
#[case::delete(actix_test::TestRequest::delete().uri("/api/v1/user?id=3").set_json(json!({"password": "x"})))]
#[case::create(actix_test::TestRequest::post().uri("/api/v1/user").set_json(json!({})))]
#[actix_web::test]
async fn user_routes_require_a_bearer_token(#[case] request: actix_test::TestRequest) {
    let (status, body) = send(MockPorts::authorised(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_key"], json!("ERR_UNAUTHORIZED_BEARER"));
}

#[actix_web::test]
async fn get_user_returns_the_envelope() {
    let mut users_query = MockUserQuery::new();
    users_query
        .expect_find_by_id()
        .withf(|id| *id == UserId::new(3))
        .return_once(|_| Ok(lecturer(3)));
    let ports = MockPorts {
        users_query,
        ..MockPorts::authorised()
    };

    let (status, body) = send(
        ports,
        actix_test::TestRequest::get()
            .uri("/api/v1/user?id=3")
            .insert_header(bearer()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("user found"));
    assert_eq!(body["data"]["role"], json!("lecturer"));
    assert_eq!(body["data"]["npm"], Value::Null);
}

#[actix_web::test]
async fn non_numeric_id_is_a_bad_request() {
    let (status, body) = send(
        MockPorts::authorised(),
        actix_test::TestRequest::get()
            .uri("/api/v1/user?id=abc")
            .insert_header(bearer()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], json!("invalid_query"));
}

#[actix_web::test]
async fn missing_user_is_not_found() {
    let mut users_query = MockUserQuery::new();
    users_query
        .expect_find_by_id()
        .return_once(|_| Err(Error::not_found("user not found")));
    let ports = MockPorts {
        users_query,
        ..MockPorts::authorised()
    };

    let (status, body) = send(
        ports,
        actix_test::TestRequest::get()
            .uri("/api/v1/user?id=404")
            .insert_header(bearer()),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_key"], json!("ERR_NOT_FOUND"));
}

#[actix_web::test]
async fn create_user_reuses_registration_rules() {
    let mut auth = MockAuthCommand::new();
    auth.expect_register()
        .withf(|registration| registration.profile.role == Role::Lecturer)
        .times(1)
        .return_once(|_| Ok(lecturer(8)));
    let ports = MockPorts {
        auth,
        ..MockPorts::authorised()
    };

    let (status, body) = send(
        ports,
        actix_test::TestRequest::post()
            .uri("/api/v1/user")
            .insert_header(bearer())
            .set_json(json!({
                "name": "Dr. Ada Lovelace",
                "email": "ada@campus.ac.id",
                "password": "secret1",
                "role": "dosen"
            })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], json!(8));
}

#[actix_web::test]
async fn update_passes_the_parsed_profile() {
    let mut users = MockUserCommand::new();
    users
        .expect_update()
        .withf(|id, profile| {
            *id == UserId::new(3)
                && profile.email.as_str() == "ada@campus.ac.id"
                && profile.npm.is_none()
        })
        .return_once(|_, _| Ok(lecturer(3)));
    let ports = MockPorts {
        users,
        ..MockPorts::authorised()
    };

    let (status, body) = send(
        ports,
        actix_test::TestRequest::put()
            .uri("/api/v1/user?id=3")
            .insert_header(bearer())
            .set_json(json!({
                "name": "Dr. Ada Lovelace",
                "email": "ADA@campus.ac.id",
                "role": "lecturer"
            })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("user updated"));
}

#[actix_web::test]
async fn update_without_role_reports_the_missing_field() {
    let mut users = MockUserCommand::new();
    users.expect_update().never();
    let ports = MockPorts {
        users,
        ..MockPorts::authorised()
    };

    let (status, body) = send(
        ports,
        actix_test::TestRequest::put()
            .uri("/api/v1/user?id=3")
            .insert_header(bearer())
            .set_json(json!({"name": "Dr. Ada Lovelace", "email": "ada@campus.ac.id"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"],
        json!({"field": "role", "code": "missing_field"})
    );
}

#[actix_web::test]
async fn unchanged_email_is_previous_field_not_allowed() {
    let mut users = MockUserCommand::new();
    users.expect_change_email().return_once(|_, _| {
        Err(Error::previous_field_not_allowed("email is unchanged"))
    });
    let ports = MockPorts {
        users,
        ..MockPorts::authorised()
    };

    let (status, body) = send(
        ports,
        actix_test::TestRequest::put()
            .uri("/api/v1/user/email?id=3")
            .insert_header(bearer())
            .set_json(json!({"email": "ada@campus.ac.id"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_key"], json!("ERR_PREVIOUS_FIELD_NOT_ALLOWED"));
}

#[rstest]
#[case::blank_current(json!({"recent_password": "", "new_password": "secret2"}), "recent_password")]
#[case::short_replacement(json!({"recent_password": "secret1", "new_password": "123"}), "new_password")]
#[actix_web::test]
async fn password_change_validates_each_field(#[case] payload: Value, #[case] field: &str) {
    let mut users = MockUserCommand::new();
    users.expect_change_password().never();
    let ports = MockPorts {
        users,
        ..MockPorts::authorised()
    };

    let (status, body) = send(
        ports,
        actix_test::TestRequest::put()
            .uri("/api/v1/user/password?id=3")
            .insert_header(bearer())
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], json!(field));
}

#[actix_web::test]
async fn password_change_acknowledges_with_null_data() {
    let mut users = MockUserCommand::new();
    users
        .expect_change_password()
        .withf(|_, change| {
            change.current.expose() == "secret1" && change.replacement.expose() == "secret2"
        })
        .return_once(|_, _| Ok(()));
    let ports = MockPorts {
        users,
        ..MockPorts::authorised()
    };

    let (status, body) = send(
        ports,
        actix_test::TestRequest::put()
            .uri("/api/v1/user/password?id=3")
            .insert_header(bearer())
            .set_json(json!({"recent_password": "secret1", "new_password": "secret2"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["message"], json!("password changed"));
}

#[actix_web::test]
async fn delete_accepts_confirm_password_alias() {
    let mut users = MockUserCommand::new();
    users
        .expect_delete()
        .withf(|id, password| *id == UserId::new(3) && password.expose() == "secret1")
        .return_once(|_, _| Ok(()));
    let ports = MockPorts {
        users,
        ..MockPorts::authorised()
    };

    let (status, body) = send(
        ports,
        actix_test::TestRequest::delete()
            .uri("/api/v1/user?id=3")
            .insert_header(bearer())
            .set_json(json!({"confirm_password": "secret1"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("user deleted"));
}
