//! Database pool construction

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Create the application connection pool.
///
/// Bounded so a slow database surfaces as acquire timeouts instead of
/// unbounded connection growth.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    tracing::debug!(
        max_connections = 10,
        "Database pool created"
    );

    Ok(pool)
}
