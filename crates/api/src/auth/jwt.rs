//! JWT issuance and validation
//!
//! Tokens are stateless HS256 JWTs carrying a subject claim (the
//! user's email) and an absolute expiration. Nothing is stored
//! server-side, which trades away pre-expiry revocation for the short
//! configured lifetime.

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// Claims embedded in every issued token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's email.
    pub sub: String,
    /// Absolute expiration as a unix timestamp.
    pub exp: i64,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,
    #[error("Invalid token")]
    Invalid,
}

/// Issues and validates signed bearer tokens.
///
/// The signing secret and token lifetime are injected at construction;
/// there is no ambient global state.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expire_minutes: i64,
}

impl JwtManager {
    pub fn new(secret: &str, expire_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expire_minutes,
        }
    }

    /// Issue a signed token for `subject`, expiring after the
    /// configured lifetime.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let exp = (OffsetDateTime::now_utc() + Duration::minutes(self.expire_minutes))
            .unix_timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            exp,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|_| TokenError::Invalid)
    }

    /// Verify signature and expiration, returning the claims unchanged.
    ///
    /// Bad signature, malformed payload, and missing claims all map to
    /// `Invalid`; only a structurally valid token past its `exp` maps
    /// to `Expired`.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        // No leeway: expiration is exact.
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_validate_round_trip() {
        let manager = JwtManager::new("test-secret-key-for-jwt", 30);

        let token = manager.issue("alice@example.com").expect("issue failed");
        let claims = manager.validate(&token).expect("validate failed");

        assert_eq!(claims.sub, "alice@example.com");
        assert!(claims.exp > OffsetDateTime::now_utc().unix_timestamp());
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let manager = JwtManager::new("test-secret-key-for-jwt", 30);
        assert_eq!(
            manager.validate("not.a.token"),
            Err(TokenError::Invalid)
        );
        assert_eq!(manager.validate(""), Err(TokenError::Invalid));
    }

    #[test]
    fn test_validate_rejects_wrong_secret() {
        let issuer = JwtManager::new("secret-one", 30);
        let verifier = JwtManager::new("secret-two", 30);

        let token = issuer.issue("alice@example.com").expect("issue failed");
        assert_eq!(verifier.validate(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_validate_rejects_tampered_signature() {
        let manager = JwtManager::new("test-secret-key-for-jwt", 30);
        let token = manager.issue("alice@example.com").expect("issue failed");

        // Flip the last signature character.
        let mut tampered = token.clone();
        let last = tampered.pop().expect("token is non-empty");
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert_eq!(manager.validate(&tampered), Err(TokenError::Invalid));
    }

    #[test]
    fn test_validate_rejects_expired_token() {
        // Negative lifetime puts exp in the past at issue time.
        let manager = JwtManager::new("test-secret-key-for-jwt", -5);

        let token = manager.issue("alice@example.com").expect("issue failed");
        assert_eq!(manager.validate(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_validate_rejects_missing_subject() {
        #[derive(serde::Serialize)]
        struct NoSubject {
            exp: i64,
        }

        let secret = "test-secret-key-for-jwt";
        let manager = JwtManager::new(secret, 30);

        let claims = NoSubject {
            exp: (OffsetDateTime::now_utc() + Duration::minutes(30)).unix_timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encode failed");

        assert_eq!(manager.validate(&token), Err(TokenError::Invalid));
    }
}
