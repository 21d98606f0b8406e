//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] lists every handler in the inbound HTTP layer. Response and
//! request schemas are collected from the handler annotations; the bearer
//! scheme is added by `SecurityAddon`. Swagger UI serves the document in
//! debug builds and `openapi-dump` exports it for tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ErrorCode;
use crate::inbound::http::error::ErrorEnvelope;

/// Registers the `bearer` security scheme referenced by protected handlers.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token returned by POST /api/v1/auth/login; the `token` cookie is also accepted.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Campus backend API",
        description = "Academic administration: accounts, classes, lectures, rooms and courses."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("bearer" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::change_email,
        crate::inbound::http::users::change_password,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::classes::create_class,
        crate::inbound::http::classes::update_class,
        crate::inbound::http::classes::delete_class,
        crate::inbound::http::classes::get_class,
        crate::inbound::http::lectures::create_lecture,
        crate::inbound::http::lectures::update_lecture,
        crate::inbound::http::lectures::delete_lecture,
        crate::inbound::http::lectures::get_lecture,
        crate::inbound::http::rooms::create_room,
        crate::inbound::http::rooms::update_room,
        crate::inbound::http::rooms::delete_room,
        crate::inbound::http::rooms::get_room,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorEnvelope, ErrorCode)),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "Account maintenance"),
        (name = "classes", description = "Classes and join codes"),
        (name = "lectures", description = "Lecturer profiles"),
        (name = "rooms", description = "Scheduled online sessions"),
        (name = "courses", description = "Courses (mata kuliah)"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
