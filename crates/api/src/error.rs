//! API error types
//!
//! Handler failures map 1:1 onto a small taxonomy, each with a fixed
//! human-readable message and status. Persistence integrity violations
//! are translated to `Conflict` at the point of the mutating write and
//! never surface as raw storage errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("User not found")]
    NotFound,
    #[error("Not enough permissions")]
    Forbidden,
    #[error("{0}")]
    Unauthorized(String),
    #[error("Database error")]
    Database(#[from] sqlx::Error),
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            ApiError::Forbidden => {
                (StatusCode::FORBIDDEN, "Not enough permissions".to_string())
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Database(e) => {
                tracing::error!(error = ?e, "Database query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_has_fixed_message() {
        let response = ApiError::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_conflict_carries_field_message() {
        let err = ApiError::Conflict("Username already exists".to_string());
        assert_eq!(err.to_string(), "Username already exists");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_database_error_is_opaque_to_callers() {
        let err = ApiError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.to_string(), "Database error");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
