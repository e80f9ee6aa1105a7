//! HTTP error mapping

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gradebook_common::Error;
use serde_json::json;
use tracing::error;

/// API errors, rendered as `{"error": message}`
#[derive(Debug)]
pub enum ApiError {
    /// Course code not in the curriculum
    NotFound(String),
    /// Value, field or request body not usable
    BadRequest(String),
    /// Store could not be read or written
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(_) => ApiError::NotFound(err.to_string()),
            Error::InvalidValue(_) | Error::InvalidField(_) => ApiError::BadRequest(err.to_string()),
            Error::Io(_) | Error::Json(_) | Error::Config(_) | Error::Internal(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                error!("Request failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
