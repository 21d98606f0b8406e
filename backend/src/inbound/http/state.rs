//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AuthCommand, ClassCommand, ClassQuery, CourseCommand, CourseQuery, LectureCommand,
    LectureQuery, RoomCommand, RoomQuery, TokenIssuer, UserCommand, UserQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub auth: Arc<dyn AuthCommand>,
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
    pub classes: Arc<dyn ClassCommand>,
    pub classes_query: Arc<dyn ClassQuery>,
    pub lectures: Arc<dyn LectureCommand>,
    pub lectures_query: Arc<dyn LectureQuery>,
    pub rooms: Arc<dyn RoomCommand>,
    pub rooms_query: Arc<dyn RoomQuery>,
    pub courses: Arc<dyn CourseCommand>,
    pub courses_query: Arc<dyn CourseQuery>,
    pub tokens: Arc<dyn TokenIssuer>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthCommand>,
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
    pub classes: Arc<dyn ClassCommand>,
    pub classes_query: Arc<dyn ClassQuery>,
    pub lectures: Arc<dyn LectureCommand>,
    pub lectures_query: Arc<dyn LectureQuery>,
    pub rooms: Arc<dyn RoomCommand>,
    pub rooms_query: Arc<dyn RoomQuery>,
    pub courses: Arc<dyn CourseCommand>,
    pub courses_query: Arc<dyn CourseQuery>,
    pub tokens: Arc<dyn TokenIssuer>,
    /// Whether the login cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// The login cookie is marked `Secure` by default; see
    /// [`HttpState::with_cookie_secure`].
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            auth,
            users,
            users_query,
            classes,
            classes_query,
            lectures,
            lectures_query,
            rooms,
            rooms_query,
            courses,
            courses_query,
            tokens,
        } = ports;
        Self {
            auth,
            users,
            users_query,
            classes,
            classes_query,
            lectures,
            lectures_query,
            rooms,
            rooms_query,
            courses,
            courses_query,
            tokens,
            cookie_secure: true,
        }
    }

    #[must_use]
    pub fn with_cookie_secure(mut self, cookie_secure: bool) -> Self {
        self.cookie_secure = cookie_secure;
        self
    }
}
