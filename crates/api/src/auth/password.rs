//! Password hashing with Argon2id
//!
//! Digests are PHC strings with a random per-hash salt, so hashing the
//! same password twice yields different digests while both still
//! verify. Verification runs in constant time inside the Argon2
//! implementation.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a cleartext password into a PHC-format digest.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a cleartext password against a stored digest.
///
/// Malformed digests verify false rather than erroring; a stored hash
/// we cannot parse is indistinguishable from a wrong password to the
/// caller.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("secret").expect("hashing failed");
        assert!(verify_password("secret", &hash));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("secret").expect("hashing failed");
        assert!(!verify_password("not-the-secret", &hash));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let first = hash_password("secret").expect("hashing failed");
        let second = hash_password("secret").expect("hashing failed");

        // Random salts: different digests, both verify.
        assert_ne!(first, second);
        assert!(verify_password("secret", &first));
        assert!(verify_password("secret", &second));
    }

    #[test]
    fn test_cleartext_never_appears_in_digest() {
        let hash = hash_password("secret").expect("hashing failed");
        assert!(!hash.contains("secret"));
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_malformed_digest_verifies_false() {
        assert!(!verify_password("secret", "not-a-phc-string"));
        assert!(!verify_password("secret", ""));
    }
}
