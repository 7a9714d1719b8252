// Test code patterns:
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Userhub API Library
//!
//! User registration, account management, and bearer-token
//! authentication endpoints.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod users;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
