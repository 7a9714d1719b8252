//! Environment-driven configuration

use anyhow::Context;

/// Default bearer token lifetime in minutes.
const DEFAULT_TOKEN_EXPIRE_MINUTES: i64 = 30;

/// Runtime configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    /// Process-wide JWT signing secret. Read-only after initialization.
    pub jwt_secret: String,
    /// Bearer token lifetime in minutes.
    pub access_token_expire_minutes: i64,
    /// Comma-separated CORS origin allowlist.
    pub allowed_origins: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters");
        }

        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let access_token_expire_minutes = match std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Ok(raw) => raw
                .parse::<i64>()
                .context("ACCESS_TOKEN_EXPIRE_MINUTES must be an integer")?,
            Err(_) => DEFAULT_TOKEN_EXPIRE_MINUTES,
        };

        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

        Ok(Self {
            database_url,
            bind_address,
            jwt_secret,
            access_token_expire_minutes,
            allowed_origins,
        })
    }
}
