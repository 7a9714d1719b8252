//! Application state

use sqlx::PgPool;

use crate::{
    auth::{AuthState, JwtManager},
    config::Config,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub jwt_manager: JwtManager,
}

impl AppState {
    /// The signing secret and token lifetime are baked into the
    /// `JwtManager` here; remaining config values (bind address, CORS
    /// origins) are consumed at startup and not carried further.
    pub fn new(pool: PgPool, config: &Config) -> Self {
        let jwt_manager =
            JwtManager::new(&config.jwt_secret, config.access_token_expire_minutes);

        Self { pool, jwt_manager }
    }

    /// Get auth state for middleware
    pub fn auth_state(&self) -> AuthState {
        AuthState {
            jwt_manager: self.jwt_manager.clone(),
            pool: self.pool.clone(),
        }
    }
}
