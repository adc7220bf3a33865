//! Wire-level error envelope.
//!
//! Every failure leaving the API is converted to the uniform
//! `{error, message, statusCode}` body before it reaches the client;
//! no error crosses the boundary as an unstructured fault.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// API error with its wire category.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Internal(String),
}

impl From<linkstash_core::Error> for ApiError {
    fn from(err: linkstash_core::Error) -> Self {
        use linkstash_core::Error;
        match err {
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::LinkNotFound(id) => ApiError::NotFound(format!("Link not found: {}", id)),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, label, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Validation Error", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "Unauthorized", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", msg),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", msg)
            }
        };

        let body = Json(serde_json::json!({
            "error": label,
            "message": message,
            "statusCode": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
