//! Bearer token issuance (login)

use axum::{extract::State, Form, Json};
use serde::{Deserialize, Serialize};

use crate::{
    auth::verify_password,
    error::{ApiError, ApiResult},
    state::AppState,
    users::repo,
};

/// OAuth2-style password grant form. The `username` field carries the
/// user's email.
#[derive(Debug, Deserialize)]
pub struct AccessTokenForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// POST /token - Exchange email + password for a bearer token
///
/// Unknown email and failed verification produce the same message, so
/// the endpoint does not reveal which accounts exist.
pub async fn login_for_access_token(
    State(state): State<AppState>,
    Form(form): Form<AccessTokenForm>,
) -> ApiResult<Json<TokenResponse>> {
    let bad_credentials =
        || ApiError::Unauthorized("Incorrect email or password".to_string());

    let user = repo::find_by_email(&state.pool, &form.username)
        .await?
        .ok_or_else(bad_credentials)?;

    if !verify_password(&form.password, &user.password_hash) {
        tracing::warn!(user_id = %user.id, "Login failed: password mismatch");
        return Err(bad_credentials());
    }

    let access_token = state.jwt_manager.issue(&user.email).map_err(|e| {
        tracing::error!(error = %e, "Token issuance failed");
        ApiError::Internal
    })?;

    tracing::info!(user_id = %user.id, "Access token issued");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}
