//! API error responses.
//!
//! Module errors are folded into [`ApiError`], rendered as
//! `{"error": <message>, "code": <status>}` with a `fields` map for
//! validation failures.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;
use crate::observability::{log_event_with_fields, Event};
use crate::places::PlaceError;
use crate::validation::FieldErrors;

/// Result type for route handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the HTTP layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Place(#[from] PlaceError),

    /// Body or query string could not be decoded
    #[error("Malformed request: {0}")]
    BadRequest(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Auth(e) => e.status_code(),
            ApiError::Place(e) => e.status_code(),
            ApiError::BadRequest(_) => 400,
        }
    }

    fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Auth(e) => e.field_errors(),
            ApiError::Place(e) => e.field_errors(),
            ApiError::BadRequest(_) => None,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        let code = err.status_code();
        let fields = err.field_errors().cloned();
        let error = if fields.is_some() {
            "Invalid input".to_string()
        } else if code >= 500 {
            "Internal server error".to_string()
        } else {
            err.to_string()
        };

        Self {
            error,
            code,
            fields,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            log_event_with_fields(
                Event::RequestFailed,
                &[
                    ("error", self.to_string().as_str()),
                    ("status", status.as_str()),
                ],
            );
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn test_status_codes_pass_through() {
        assert_eq!(ApiError::from(AuthError::InvalidToken).status_code(), 401);
        assert_eq!(ApiError::from(PlaceError::DuplicateReview).status_code(), 409);
        assert_eq!(ApiError::BadRequest("x".into()).status_code(), 400);
        assert_eq!(
            ApiError::from(AuthError::Store(StoreError::NotFound)).status_code(),
            404
        );
    }

    #[test]
    fn test_validation_body_has_fields() {
        let err = ApiError::from(AuthError::Validation(FieldErrors::single(
            "phone_number",
            "This field is required.",
        )));
        let body = serde_json::to_value(ErrorResponse::from(&err)).unwrap();

        assert_eq!(body["code"], 400);
        assert_eq!(body["error"], "Invalid input");
        assert_eq!(body["fields"]["phone_number"][0], "This field is required.");
    }

    #[test]
    fn test_plain_body_omits_fields() {
        let err = ApiError::from(PlaceError::PlaceNotFound);
        let body = serde_json::to_value(ErrorResponse::from(&err)).unwrap();

        assert_eq!(body["code"], 404);
        assert_eq!(body["error"], "Not found.");
        assert!(body.get("fields").is_none());
    }

    #[test]
    fn test_server_error_detail_is_hidden() {
        let err = ApiError::from(PlaceError::Store(StoreError::Database(
            rusqlite::Error::InvalidQuery,
        )));
        let body = serde_json::to_value(ErrorResponse::from(&err)).unwrap();

        assert_eq!(body["code"], 500);
        assert_eq!(body["error"], "Internal server error");
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::from(AuthError::UserNotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
