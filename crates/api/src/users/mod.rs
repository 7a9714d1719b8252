//! User records and their persistence layer

pub mod repo;

use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Persisted user record. The password exists here only as its hash.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Response view of a user, excluding the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_view_excludes_password_hash() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };

        let public = PublicUser::from(user);
        let json = serde_json::to_value(&public).expect("serialization failed");

        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "username": "alice",
                "email": "alice@example.com"
            })
        );
    }
}
