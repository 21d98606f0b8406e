//! Bearer-token extractor guarding the protected routes.
//!
//! The token is read from `Authorization: Bearer <token>` and, when that
//! header is absent, from the `token` cookie set at login. Verification goes
//! through the [`TokenIssuer`](crate::domain::ports::TokenIssuer) held in
//! [`HttpState`].

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::ports::TokenError;
use crate::domain::{Error, TokenClaims, UserId};
use crate::inbound::http::state::HttpState;

/// Name of the cookie mirroring the access token.
pub const TOKEN_COOKIE: &str = "token";

/// Claims of the caller, available to handlers that take this extractor.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(TokenClaims);

impl AuthenticatedUser {
    pub fn user_id(&self) -> UserId {
        self.0.user_id()
    }

    pub fn claims(&self) -> &TokenClaims {
        &self.0
    }
}

fn presented_token(req: &HttpRequest) -> Result<String, Error> {
    if let Some(header) = req.headers().get(AUTHORIZATION) {
        let value = header
            .to_str()
            .map_err(|_| Error::unauthorized("authorization header is not valid text"))?;
        let token = match value.split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim(),
            _ => return Err(Error::unauthorized("authorization header must use the Bearer scheme")),
        };
        if token.is_empty() {
            return Err(Error::unauthorized("bearer token is empty"));
        }
        return Ok(token.to_owned());
    }

    req.cookie(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("missing bearer token"))
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))?;
    let token = presented_token(req)?;
    state
        .tokens
        .verify(&token)
        .map(AuthenticatedUser)
        .map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            match err {
                TokenError::Expired => Error::unauthorized("token has expired"),
                _ => Error::unauthorized("token is invalid"),
            }
        })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockTokenIssuer;
    use crate::domain::{ClassId, Role};
    use crate::inbound::http::test_utils::MockPorts;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    fn claims() -> TokenClaims {
        TokenClaims {
            iss: "campus-backend".into(),
            sub: "5".into(),
            id: UserId::new(5),
            name: "Student One".into(),
            email: "a@x.com".into(),
            role: Role::Student,
            class_id: Some(ClassId::new(1)),
            exp: 0,
            nbf: 0,
            iat: 0,
        }
    }

    fn issuer_accepting(expected: &'static str) -> MockTokenIssuer {
        let mut tokens = MockTokenIssuer::new();
        tokens.expect_verify().returning(move |token| {
            if token == expected {
                Ok(claims())
            } else if token == "stale" {
                Err(TokenError::expired())
            } else {
                Err(TokenError::invalid("bad signature"))
            }
        });
        tokens
    }

    async fn call(request: actix_test::TestRequest) -> (StatusCode, String) {
        let mut ports = MockPorts::default();
        ports.tokens = issuer_accepting("good");
        let app = actix_test::init_service(
            App::new().app_data(web::Data::new(ports.into_state())).route(
                "/whoami",
                web::get().to(|user: AuthenticatedUser| async move {
                    HttpResponse::Ok().body(user.user_id().to_string())
                }),
            ),
        )
        .await;
        let response = actix_test::call_service(&app, request.uri("/whoami").to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[rstest]
    #[case::header(actix_test::TestRequest::get().insert_header((AUTHORIZATION, "Bearer good")))]
    #[case::lowercase_scheme(actix_test::TestRequest::get().insert_header((AUTHORIZATION, "bearer good")))]
    #[case::cookie(actix_test::TestRequest::get().cookie(Cookie::new(TOKEN_COOKIE, "good")))]
    #[actix_web::test]
    async fn accepts_valid_tokens(#[case] request: actix_test::TestRequest) {
        let (status, body) = call(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "5");
    }

    #[rstest]
    #[case::missing(actix_test::TestRequest::get(), "missing bearer token")]
    #[case::basic(
        actix_test::TestRequest::get().insert_header((AUTHORIZATION, "Basic Zm9vOmJhcg==")),
        "authorization header must use the Bearer scheme"
    )]
    #[case::empty(
        actix_test::TestRequest::get().insert_header((AUTHORIZATION, "Bearer ")),
        "bearer token is empty"
    )]
    #[case::forged(
        actix_test::TestRequest::get().insert_header((AUTHORIZATION, "Bearer forged")),
        "token is invalid"
    )]
    #[case::expired(
        actix_test::TestRequest::get().cookie(Cookie::new(TOKEN_COOKIE, "stale")),
        "token has expired"
    )]
    #[actix_web::test]
    async fn rejects_with_unauthorized_bearer(
        #[case] request: actix_test::TestRequest,
        #[case] message: &str,
    ) {
        let (status, body) = call(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let value: Value = serde_json::from_str(&body).expect("error envelope");
        assert_eq!(value["error_key"], "ERR_UNAUTHORIZED_BEARER");
        assert_eq!(value["message"], message);
    }

    #[rstest]
    #[actix_web::test]
    async fn header_takes_precedence_over_cookie() {
        let request = actix_test::TestRequest::get()
            .insert_header((AUTHORIZATION, "Bearer forged"))
            .cookie(Cookie::new(TOKEN_COOKIE, "good"));
        let (status, _) = call(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
