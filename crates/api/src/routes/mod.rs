//! Route assembly

pub mod token;
pub mod users;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;

use crate::{auth::require_auth, state::AppState};

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

/// Liveness probe
async fn root() -> Json<Message> {
    Json(Message {
        message: "userhub is running".to_string(),
    })
}

pub fn create_router(state: AppState) -> Router {
    let auth_state = state.auth_state();

    // Endpoints gated on a valid bearer token.
    let protected = Router::new()
        .route("/users/", get(users::list_users))
        .route("/users/{user_id}", put(users::update_user))
        .route("/users/{user_id}", delete(users::delete_user))
        .layer(middleware::from_fn_with_state(auth_state, require_auth));

    Router::new()
        .route("/", get(root))
        .route("/users/", post(users::create_user))
        .route("/users/{user_id}/email", get(users::read_user_email))
        .route("/token", post(token::login_for_access_token))
        .merge(protected)
        .with_state(state)
}
