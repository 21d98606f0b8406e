//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every structural failure becomes `ERR_BAD_REQUEST_FIELD` with
//! `details: {field, code}` so clients can highlight the offending input.

use std::fmt;

use actix_web::web;
use serde_json::json;
use tracing::debug;

use crate::domain::{
    CredentialValidationError, Error, LabelValidationError, RoleParseError, RoomValidationError,
    UserValidationError,
};

/// Validation error codes raised by the adapter itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidBody,
    InvalidQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidQuery => "invalid_query",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: &str) -> Error {
        Error::bad_request(self.message).with_details(json!({
            "field": self.field,
            "code": code,
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField.as_str())
}

/// Unwrap a required request value or report it as missing.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Domain validation failures that name the request field they concern.
pub(crate) trait FieldViolation: fmt::Display {
    fn field(&self) -> &'static str;
    fn code(&self) -> &'static str;
}

macro_rules! field_violation {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FieldViolation for $ty {
                fn field(&self) -> &'static str {
                    <$ty>::field(self)
                }

                fn code(&self) -> &'static str {
                    <$ty>::code(self)
                }
            }
        )+
    };
}

field_violation!(
    UserValidationError,
    CredentialValidationError,
    LabelValidationError,
    RoomValidationError,
);

impl FieldViolation for RoleParseError {
    fn field(&self) -> &'static str {
        "role"
    }

    fn code(&self) -> &'static str {
        "invalid_role"
    }
}

/// Map a domain validation failure to a field-level bad request.
pub(crate) fn invalid_field<E: FieldViolation>(err: E) -> Error {
    ValidationError::new(err.field(), err.to_string()).with_code(err.code())
}

/// Like [`invalid_field`] but reported against `field`, for requests that
/// carry several values of the same kind (e.g. two passwords).
pub(crate) fn invalid_field_as<E: FieldViolation>(field: FieldName, err: E) -> Error {
    ValidationError::new(field.as_str(), err.to_string()).with_code(err.code())
}

/// JSON extractor configuration rendering body errors in the failure envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected request body");
        ValidationError::new("body", format!("invalid request body: {err}"))
            .with_code(ErrorCode::InvalidBody.as_str())
            .into()
    })
}

/// Query-string extractor configuration rendering errors in the failure envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected query string");
        ValidationError::new("query", format!("invalid query string: {err}"))
            .with_code(ErrorCode::InvalidQuery.as_str())
            .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode as DomainCode, PersonName};
    use rstest::rstest;

    #[rstest]
    fn missing_field_names_the_field() {
        let err = missing_field_error(FieldName::new("lecture_id"));
        assert_eq!(err.code(), DomainCode::BadRequestField);
        assert_eq!(err.message(), "missing required field: lecture_id");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "lecture_id", "code": "missing_field"}))
        );
    }

    #[rstest]
    fn require_passes_present_values_through() {
        assert_eq!(require(Some(4), FieldName::new("id")).ok(), Some(4));
        assert!(require::<i64>(None, FieldName::new("id")).is_err());
    }

    #[rstest]
    fn user_validation_is_reported_per_field() {
        let err = invalid_field(PersonName::new("Ada").expect_err("too short"));
        assert_eq!(
            err.details(),
            Some(&json!({"field": "name", "code": "too_short"}))
        );
    }

    #[rstest]
    fn role_parse_errors_point_at_role() {
        let err = invalid_field(RoleParseError("janitor".into()));
        assert_eq!(err.message(), "unknown role: janitor");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "role", "code": "invalid_role"}))
        );
    }

    #[rstest]
    fn room_errors_keep_the_inner_field() {
        let err = invalid_field(RoomValidationError::EndBeforeStart);
        assert_eq!(
            err.details(),
            Some(&json!({"field": "end_room", "code": "invalid_range"}))
        );
    }
}
