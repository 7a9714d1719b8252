//! User directory: query layer over the `users` table
//!
//! Username and email carry UNIQUE constraints; the database is the
//! final arbiter for concurrent writes. Handler-level pre-checks only
//! exist to produce a friendlier error message, so every mutating
//! caller must still treat a unique violation from here as a conflict.

use sqlx::PgPool;

use super::User;

/// Whether a sqlx error is a unique-constraint violation, as opposed
/// to any other database failure.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, username, email, password_hash, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, username, email, password_hash, created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Find any user colliding with the given username or email.
///
/// Used by registration as the pre-check; callers inspect which field
/// matched to pick the conflict message.
pub async fn find_by_username_or_email(
    pool: &PgPool,
    username: &str,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, username, email, password_hash, created_at, updated_at
        FROM users
        WHERE username = $1 OR email = $2
        LIMIT 1
        "#,
    )
    .bind(username)
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn list(pool: &PgPool, skip: i64, limit: i64) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, username, email, password_hash, created_at, updated_at
        FROM users
        ORDER BY id
        OFFSET $1 LIMIT $2
        "#,
    )
    .bind(skip)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn insert(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO users (username, email, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id, username, email, password_hash, created_at, updated_at
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}

/// Overwrite username, email, and password hash on an existing record.
///
/// Returns `None` if the row vanished between authentication and the
/// write.
pub async fn update(
    pool: &PgPool,
    id: i64,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE users
        SET username = $2,
            email = $3,
            password_hash = $4,
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, username, email, password_hash, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let rows_affected = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(rows_affected > 0)
}
