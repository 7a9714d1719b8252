//! User account handlers
//!
//! Registration is public; list/update/delete require authentication,
//! and mutations are restricted to the account owner. The email lookup
//! is a public read keyed by id.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{hash_password, AuthUser},
    error::{ApiError, ApiResult},
    routes::Message,
    state::AppState,
    users::{repo, PublicUser, User},
};

// =============================================================================
// Request/Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct UserList {
    pub users: Vec<PublicUser>,
}

#[derive(Debug, Serialize)]
pub struct Email {
    pub email: String,
}

// =============================================================================
// Helper Functions
// =============================================================================

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 1000;

/// Clamp caller-supplied pagination to sane bounds.
fn page_bounds(query: &ListUsersQuery) -> (i64, i64) {
    let skip = query.skip.unwrap_or(0).max(0);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    (skip, limit)
}

/// Minimal syntactic email check: one `@`, non-empty local part, and a
/// dotted domain. Full address-grammar validation is the schema
/// layer's job.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
        && !domain.contains('@')
}

/// Pick the conflict error for a registration pre-check hit.
/// Username collisions take priority when both fields collide.
fn registration_conflict(existing: &User, username: &str) -> ApiError {
    if existing.username == username {
        ApiError::Conflict("Username already exists".to_string())
    } else {
        ApiError::Conflict("Email already exists".to_string())
    }
}

/// Mutations are allowed only on the caller's own record.
fn ensure_owner(auth_user: &AuthUser, target_id: i64) -> ApiResult<()> {
    if auth_user.id != target_id {
        return Err(ApiError::Forbidden);
    }
    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /users/ - Register a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> ApiResult<(StatusCode, Json<PublicUser>)> {
    if !is_valid_email(&payload.email) {
        return Err(ApiError::Validation("Invalid email address".to_string()));
    }

    // Pre-check for a friendlier message; the UNIQUE constraints below
    // remain the arbiter under concurrency.
    if let Some(existing) =
        repo::find_by_username_or_email(&state.pool, &payload.username, &payload.email).await?
    {
        return Err(registration_conflict(&existing, &payload.username));
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        tracing::error!(error = %e, "Password hashing failed");
        ApiError::Internal
    })?;

    let user = repo::insert(&state.pool, &payload.username, &payload.email, &password_hash)
        .await
        .map_err(|e| {
            if repo::is_unique_violation(&e) {
                // Lost a registration race after a clean pre-check; the
                // constraint name does not say which field collided.
                ApiError::Conflict("Username or Email already exists".to_string())
            } else {
                ApiError::from(e)
            }
        })?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users/ - List users (any authenticated caller)
pub async fn list_users(
    State(state): State<AppState>,
    Extension(_auth_user): Extension<AuthUser>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Json<UserList>> {
    let (skip, limit) = page_bounds(&query);

    let users = repo::list(&state.pool, skip, limit).await?;

    Ok(Json(UserList {
        users: users.into_iter().map(PublicUser::from).collect(),
    }))
}

/// PUT /users/{user_id} - Overwrite the caller's own record
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UserPayload>,
) -> ApiResult<Json<PublicUser>> {
    ensure_owner(&auth_user, user_id)?;

    if !is_valid_email(&payload.email) {
        return Err(ApiError::Validation("Invalid email address".to_string()));
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        tracing::error!(error = %e, "Password hashing failed");
        ApiError::Internal
    })?;

    let updated = repo::update(
        &state.pool,
        auth_user.id,
        &payload.username,
        &payload.email,
        &password_hash,
    )
    .await
    .map_err(|e| {
        if repo::is_unique_violation(&e) {
            ApiError::Conflict("Username or Email already exists".to_string())
        } else {
            ApiError::from(e)
        }
    })?;

    // The row can vanish between authentication and the write.
    let user = updated.ok_or(ApiError::NotFound)?;

    tracing::info!(user_id = %user.id, "User updated");

    Ok(Json(user.into()))
}

/// DELETE /users/{user_id} - Remove the caller's own record
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Message>> {
    ensure_owner(&auth_user, user_id)?;

    if !repo::delete(&state.pool, auth_user.id).await? {
        return Err(ApiError::NotFound);
    }

    tracing::info!(user_id = %auth_user.id, "User deleted");

    Ok(Json(Message {
        message: "User deleted".to_string(),
    }))
}

/// GET /users/{user_id}/email - Public email lookup by id
pub async fn read_user_email(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Email>> {
    let user = repo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(Email { email: user.email }))
}

// =============================================================================
// Tests
// =============================================================================
