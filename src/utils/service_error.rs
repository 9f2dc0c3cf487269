// Service error type shared by the HTTP handlers
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::DbError;
use crate::services::{JwtError, ShortCodeError};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found")]
    NotFound,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Short code space exhausted after {0} attempts")]
    CodeSpaceExhausted(usize),

    #[error("Internal server error")]
    InternalError,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServiceError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            },
            ServiceError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            ServiceError::NotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
            ServiceError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ServiceError::CodeSpaceExhausted(attempts) => {
                tracing::error!("Short code space exhausted after {} attempts", attempts);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Could not allocate a short link, try again later".to_string(),
                )
            },
            ServiceError::InternalError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

// Conversion from various error types
impl From<DbError> for ServiceError {
    fn from(error: DbError) -> Self {
        ServiceError::DatabaseError(error.to_string())
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(error: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(error.to_string())
    }
}

impl From<JwtError> for ServiceError {
    fn from(error: JwtError) -> Self {
        tracing::debug!("Rejected bearer token: {}", error);
        ServiceError::Unauthorized
    }
}

impl From<ShortCodeError> for ServiceError {
    fn from(error: ShortCodeError) -> Self {
        match error {
            ShortCodeError::DatabaseError(e) => ServiceError::DatabaseError(e.to_string()),
            ShortCodeError::CodeSpaceExhausted { attempts } => {
                ServiceError::CodeSpaceExhausted(attempts)
            },
            ShortCodeError::InvalidLength(..) | ShortCodeError::InvalidAttemptLimit => {
                ServiceError::InternalError
            },
        }
    }
}
