// Error taxonomy for the booking service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failures of the persistence layer itself. Logged at the store boundary;
/// the HTTP layer maps them to per-route 500 messages.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to write data file: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to serialize state: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Request-level errors. Each variant carries the message placed in the
/// `{"error": ...}` envelope; the variant decides the status code.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or out-of-range input -> 400.
    #[error("{0}")]
    Validation(String),

    /// Unknown room or booking id -> 404.
    #[error("{0}")]
    NotFound(String),

    /// Duplicate room, or deleting a booked room -> 409.
    #[error("{0}")]
    Conflict(String),

    /// Persistence write failure -> 500.
    #[error("{0}")]
    Storage(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::Storage("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
