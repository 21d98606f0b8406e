//! Wiring from Diesel repositories and credential adapters to HTTP ports.

use std::sync::Arc;

use zeroize::Zeroizing;

use campus_backend::domain::{
    AuthService, ClassService, CourseService, LectureService, RoomService, UserService,
};
use campus_backend::inbound::http::state::{HttpState, HttpStatePorts};
use campus_backend::outbound::credentials::{Argon2PasswordHasher, JwtTokenIssuer};
use campus_backend::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselClassRepository, DieselCourseRepository,
    DieselLectureRepository, DieselRoomRepository, DieselUserRepository,
};

/// Token signing inputs resolved from settings.
pub struct TokenSettings<'a> {
    pub secret: &'a Zeroizing<Vec<u8>>,
    pub issuer: &'a str,
}

/// Build the HTTP state with every port backed by PostgreSQL.
///
/// Each service receives the repositories it consults for cross-entity
/// checks; repositories share the one pool.
pub fn build_http_state(pool: &DbPool, tokens: TokenSettings<'_>, cookie_secure: bool) -> HttpState {
    let accounts = Arc::new(DieselAccountRepository::new(pool.clone()));
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let classes = Arc::new(DieselClassRepository::new(pool.clone()));
    let lectures = Arc::new(DieselLectureRepository::new(pool.clone()));
    let rooms = Arc::new(DieselRoomRepository::new(pool.clone()));
    let courses = Arc::new(DieselCourseRepository::new(pool.clone()));
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let issuer = Arc::new(JwtTokenIssuer::new(tokens.secret, tokens.issuer));

    let auth = Arc::new(AuthService::new(
        accounts,
        users.clone(),
        classes.clone(),
        hasher.clone(),
        issuer.clone(),
    ));
    let user_service = Arc::new(UserService::new(users.clone(), classes.clone(), hasher));
    let class_service = Arc::new(ClassService::new(classes, users.clone()));
    let lecture_service = Arc::new(LectureService::new(lectures.clone(), users));
    let room_service = Arc::new(RoomService::new(rooms, lectures));
    let course_service = Arc::new(CourseService::new(courses));

    HttpState::new(HttpStatePorts {
        auth,
        users: user_service.clone(),
        users_query: user_service,
        classes: class_service.clone(),
        classes_query: class_service,
        lectures: lecture_service.clone(),
        lectures_query: lecture_service,
        rooms: room_service.clone(),
        rooms_query: room_service,
        courses: course_service.clone(),
        courses_query: course_service,
        tokens: issuer,
    })
    .with_cookie_secure(cookie_secure)
}
