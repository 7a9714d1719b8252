//! Unit tests for authentication middleware
//!
//! Tests cover:
//! - Bearer token extraction from request headers
//! - Token validation failures (invalid, expired, wrong secret)
//! - The uniform "Could not validate credentials" response
//!
//! Paths that reach the user directory require a live database and are
//! out of scope here; the lazy pool below never connects.

#[cfg(test)]
mod tests {
    use super::super::jwt::JwtManager;
    use super::super::middleware::*;
    use axum::{
        body::Body,
        extract::Request,
        http::{header::AUTHORIZATION, StatusCode},
        response::IntoResponse,
    };
    use sqlx::postgres::PgPoolOptions;

    /// Setup test authentication state with a lazy (never-connected) pool
    fn setup_auth_state() -> AuthState {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgresql://localhost/userhub_test")
            .expect("lazy pool construction should not fail");

        AuthState {
            jwt_manager: JwtManager::new("test-jwt-secret-key-for-testing-only", 30),
            pool,
        }
    }

    fn request_with_auth_header(value: &str) -> Request {
        Request::builder()
            .uri("/users/")
            .header(AUTHORIZATION, value)
            .body(Body::empty())
            .expect("request construction should not fail")
    }

    #[tokio::test]
    async fn test_authenticate_rejects_garbage_token() {
        let auth_state = setup_auth_state();

        let result = authenticate(&auth_state, "not.a.token").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_token_from_other_secret() {
        let auth_state = setup_auth_state();
        let foreign_manager = JwtManager::new("some-entirely-different-secret", 30);

        let token = foreign_manager
            .issue("alice@example.com")
            .expect("issue failed");

        let result = authenticate(&auth_state, &token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_expired_token() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgresql://localhost/userhub_test")
            .expect("lazy pool construction should not fail");
        let auth_state = AuthState {
            jwt_manager: JwtManager::new("test-jwt-secret-key-for-testing-only", -5),
            pool,
        };

        let token = auth_state
            .jwt_manager
            .issue("alice@example.com")
            .expect("issue failed");

        let result = authenticate(&auth_state, &token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_credential_failures_share_one_response() {
        for err in [
            AuthError::MissingAuth,
            AuthError::InvalidToken,
            AuthError::UnknownSubject,
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_database_error_is_not_a_credential_failure() {
        let response = AuthError::DatabaseError.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_extract_bearer_token_accepts_bearer_scheme() {
        let request = request_with_auth_header("Bearer abc123");
        assert_eq!(extract_bearer_token(&request), Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_bearer_token_rejects_other_schemes() {
        let request = request_with_auth_header("Basic abc123");
        assert_eq!(extract_bearer_token(&request), None);

        let no_header = Request::builder()
            .uri("/users/")
            .body(Body::empty())
            .expect("request construction should not fail");
        assert_eq!(extract_bearer_token(&no_header), None);
    }
}
