//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, web};

use crate::domain::ports::{
    MockAuthCommand, MockClassCommand, MockClassQuery, MockCourseCommand, MockCourseQuery,
    MockLectureCommand, MockLectureQuery, MockRoomCommand, MockRoomQuery, MockTokenIssuer,
    MockUserCommand, MockUserQuery,
};
use crate::domain::ports::TokenError;
use crate::domain::{Role, TokenClaims, UserId};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Token accepted by [`MockPorts::authorised`].
pub const TEST_TOKEN: &str = "test-token";

/// One mock per port; set expectations on the fields you need, then call
/// [`MockPorts::into_state`].
#[derive(Default)]
pub struct MockPorts {
    pub auth: MockAuthCommand,
    pub users: MockUserCommand,
    pub users_query: MockUserQuery,
    pub classes: MockClassCommand,
    pub classes_query: MockClassQuery,
    pub lectures: MockLectureCommand,
    pub lectures_query: MockLectureQuery,
    pub rooms: MockRoomCommand,
    pub rooms_query: MockRoomQuery,
    pub courses: MockCourseCommand,
    pub courses_query: MockCourseQuery,
    pub tokens: MockTokenIssuer,
}

impl MockPorts {
    /// Mocks whose token issuer accepts [`TEST_TOKEN`] as an admin's token.
    pub fn authorised() -> Self {
        let mut ports = Self::default();
        ports.tokens.expect_verify().returning(|token| {
            if token == TEST_TOKEN {
                Ok(admin_claims())
            } else {
                Err(TokenError::invalid("unknown token"))
            }
        });
        ports
    }

    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            auth: Arc::new(self.auth),
            users: Arc::new(self.users),
            users_query: Arc::new(self.users_query),
            classes: Arc::new(self.classes),
            classes_query: Arc::new(self.classes_query),
            lectures: Arc::new(self.lectures),
            lectures_query: Arc::new(self.lectures_query),
            rooms: Arc::new(self.rooms),
            rooms_query: Arc::new(self.rooms_query),
            courses: Arc::new(self.courses),
            courses_query: Arc::new(self.courses_query),
            tokens: Arc::new(self.tokens),
        })
        .with_cookie_secure(false)
    }
}

fn admin_claims() -> TokenClaims {
    TokenClaims {
        iss: "campus-backend".into(),
        sub: "1".into(),
        id: UserId::new(1),
        name: "Campus Admin".into(),
        email: "admin@campus.ac.id".into(),
        role: Role::Admin,
        class_id: None,
        exp: i64::MAX,
        nbf: 0,
        iat: 0,
    }
}

/// `Authorization` header carrying [`TEST_TOKEN`].
pub fn bearer() -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {TEST_TOKEN}"))
}

/// App with the full `/api/v1` surface mounted over `ports`.
pub fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .service(web::scope("/api/v1").configure(crate::inbound::http::configure_api))
}
