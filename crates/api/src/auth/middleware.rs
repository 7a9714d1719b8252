//! Authentication middleware for Axum
//!
//! Resolves a bearer token to a persisted user: the token must
//! validate and its subject must still exist in the user directory.
//! Every failure renders the same 401 body so a caller cannot tell a
//! bad token apart from a user deleted after issuance.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::PgPool;

use super::jwt::JwtManager;
use crate::users::repo;

/// Authenticated user resolved from a bearer token.
///
/// Inserted into request extensions by `require_auth` and read by
/// protected handlers for ownership checks.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// State needed for authentication
#[derive(Clone)]
pub struct AuthState {
    pub jwt_manager: JwtManager,
    pub pool: PgPool,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authentication")]
    MissingAuth,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Token subject no longer exists")]
    UnknownSubject,
    #[error("Database error")]
    DatabaseError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // One message for all credential failures; only infrastructure
        // errors are distinguished.
        let (status, message) = match self {
            AuthError::MissingAuth | AuthError::InvalidToken | AuthError::UnknownSubject => {
                (StatusCode::UNAUTHORIZED, "Could not validate credentials")
            }
            AuthError::DatabaseError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

/// Extract bearer token from the Authorization header
pub(crate) fn extract_bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(String::from)
}

/// Middleware that requires authentication
pub async fn require_auth(
    State(auth_state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    let token = match extract_bearer_token(&request) {
        Some(token) => token,
        None => {
            tracing::warn!(path = %path, "require_auth: no bearer token found");
            return AuthError::MissingAuth.into_response();
        }
    };

    match authenticate(&auth_state, &token).await {
        Ok(auth_user) => {
            tracing::debug!(
                path = %path,
                user_id = %auth_user.id,
                "require_auth: authentication successful"
            );
            request.extensions_mut().insert(auth_user);
            next.run(request).await
        }
        Err(err) => {
            tracing::warn!(path = %path, error = ?err, "require_auth: authentication failed");
            err.into_response()
        }
    }
}

/// Validate the token and resolve its subject to a user record.
pub(crate) async fn authenticate(
    auth_state: &AuthState,
    token: &str,
) -> Result<AuthUser, AuthError> {
    let claims = auth_state
        .jwt_manager
        .validate(token)
        .map_err(|_| AuthError::InvalidToken)?;

    let user = repo::find_by_email(&auth_state.pool, &claims.sub)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "authenticate: user lookup failed");
            AuthError::DatabaseError
        })?
        .ok_or(AuthError::UnknownSubject)?;

    Ok(AuthUser {
        id: user.id,
        username: user.username,
        email: user.email,
    })
}
