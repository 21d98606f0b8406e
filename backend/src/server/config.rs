//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::web;

use campus_backend::inbound::http::state::HttpState;

/// Everything `create_server` needs besides the health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: web::Data<HttpState>,
    pub(crate) swagger: bool,
}

impl ServerConfig {
    /// Swagger UI is served in debug builds only.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: HttpState) -> Self {
        Self {
            bind_addr,
            http_state: web::Data::new(http_state),
            swagger: cfg!(debug_assertions),
        }
    }
}
