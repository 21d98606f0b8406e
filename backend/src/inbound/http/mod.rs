//! HTTP inbound adapter exposing the REST endpoints under `/api/v1`.

pub mod auth;
pub mod bearer;
pub mod classes;
pub mod courses;
pub mod envelope;
pub mod error;
pub mod health;
pub mod lectures;
pub mod query;
pub mod rooms;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler plus the JSON and query extractor
/// configuration that turns malformed input into field errors.
///
/// The caller supplies `web::Data<HttpState>` and the `/api/v1` scope.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::query_config())
        .service(auth::register)
        .service(auth::login)
        .service(users::create_user)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::change_email)
        .service(users::change_password)
        .service(users::delete_user)
        .service(classes::create_class)
        .service(classes::update_class)
        .service(classes::delete_class)
        .service(classes::get_class)
        .service(lectures::create_lecture)
        .service(lectures::update_lecture)
        .service(lectures::delete_lecture)
        .service(lectures::get_lecture)
        .service(rooms::create_room)
        .service(rooms::update_room)
        .service(rooms::delete_room)
        .service(rooms::get_room)
        .service(courses::create_course)
        .service(courses::update_course)
        .service(courses::delete_course)
        .service(courses::get_course);
}
