//! Success envelope shared by every endpoint.
//!
//! ```json
//! {"success":true,"status_code":200,"message":"class created","data":{"id":1}}
//! ```

use actix_web::http::StatusCode;
use actix_web::web;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Successful response carrying `data`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Envelope<T> {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = 200)]
    pub status_code: u16,
    pub message: String,
    pub data: T,
}

impl<T> Envelope<T> {
    /// Wrap `data` in a `200 OK` envelope.
    pub fn ok(message: impl Into<String>, data: T) -> web::Json<Self> {
        web::Json(Self {
            success: true,
            status_code: StatusCode::OK.as_u16(),
            message: message.into(),
            data,
        })
    }
}

/// Successful response for writes that return nothing; `data` is `null`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Acknowledgement {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = 200)]
    pub status_code: u16,
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub data: Option<Value>,
}

impl Acknowledgement {
    pub fn ok(message: impl Into<String>) -> web::Json<Self> {
        web::Json(Self {
            success: true,
            status_code: StatusCode::OK.as_u16(),
            message: message.into(),
            data: None,
        })
    }
}
