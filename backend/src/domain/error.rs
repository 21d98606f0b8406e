//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::TraceId;

/// Header name carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Stable machine-readable error key describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ErrorCode {
    /// The request is malformed, fails validation or breaks a business rule.
    #[serde(rename = "ERR_BAD_REQUEST_FIELD")]
    BadRequestField,
    /// The bearer token is missing, malformed or expired.
    #[serde(rename = "ERR_UNAUTHORIZED_BEARER")]
    Unauthorized,
    /// The requested resource does not exist.
    #[serde(rename = "ERR_NOT_FOUND")]
    NotFound,
    /// A unique value is already owned by another record.
    #[serde(rename = "ERR_ALREADY_USE")]
    AlreadyUse,
    /// A unique field was "changed" to the value it already holds.
    #[serde(rename = "ERR_PREVIOUS_FIELD_NOT_ALLOWED")]
    PreviousFieldNotAllowed,
    /// The mutation is blocked by records that still reference the target.
    #[serde(rename = "ERR_CONFLICT")]
    Conflict,
    /// A backing service (usually the database) is unreachable.
    #[serde(rename = "ERR_SERVICE_UNAVAILABLE")]
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    #[serde(rename = "ERR_INTERNAL_SERVER")]
    InternalServer,
}

impl ErrorCode {
    /// Wire key for the code, e.g. `ERR_NOT_FOUND`.
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::BadRequestField => "ERR_BAD_REQUEST_FIELD",
            Self::Unauthorized => "ERR_UNAUTHORIZED_BEARER",
            Self::NotFound => "ERR_NOT_FOUND",
            Self::AlreadyUse => "ERR_ALREADY_USE",
            Self::PreviousFieldNotAllowed => "ERR_PREVIOUS_FIELD_NOT_ALLOWED",
            Self::Conflict => "ERR_CONFLICT",
            Self::ServiceUnavailable => "ERR_SERVICE_UNAVAILABLE",
            Self::InternalServer => "ERR_INTERNAL_SERVER",
        }
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is non-empty once trimmed; blank messages are replaced by the
///   error key so callers always have something to show.
/// - `trace_id` is captured from the task-local [`TraceId`] when one is in
///   scope at construction time.
///
/// # Examples
/// ```
/// use campus_backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("class 7 does not exist");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
    trace_id: Option<String>,
}

impl Error {
    /// Create a new error, capturing the current trace identifier if any.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.as_key().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            details: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Correlation identifier of the request that produced this error.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Override the captured trace identifier.
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::BadRequestField`].
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequestField, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::AlreadyUse`].
    pub fn already_use(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AlreadyUse, message)
    }

    /// Convenience constructor for [`ErrorCode::PreviousFieldNotAllowed`].
    pub fn previous_field_not_allowed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PreviousFieldNotAllowed, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalServer`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalServer, message)
    }
}
