//! Password hashing and access tokens

use crate::contract::{Role, StoreError};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SALT_LEN: usize = 16;

/// Hash a password with Argon2id into a PHC string with the salt embedded
pub fn hash_password(password: &str) -> Result<String, StoreError> {
    let salt = SaltString::encode_b64(&rand::random::<[u8; SALT_LEN]>()).map_err(|e| {
        tracing::error!("Failed to encode password salt: {}", e);
        StoreError::Internal
    })?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!("Failed to hash password: {}", e);
            StoreError::Internal
        })
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash is malformed: {}", e);
            false
        }
    }
}

/// JWT claims carried by access tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i32,
    /// Role at issue time; the live role is re-read on every request
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HS256 access tokens
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user_id: i32, role: Role) -> Result<String, StoreError> {
        let now = chrono::Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            sub: user_id,
            role: role.as_str().to_string(),
            iat: now,
            exp: now.saturating_add(ttl),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            tracing::error!("Failed to sign access token: {}", e);
            StoreError::Internal
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, StoreError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected access token: {}", e);
                StoreError::unauthorized("invalid token")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_roundtrip() {
        let stored = hash_password("s3cret").unwrap();
        assert!(verify_password("s3cret", &stored));
        assert!(!verify_password("S3cret", &stored));
    }

    #[test]
    fn test_hash_is_argon2id_phc_string() {
        let stored = hash_password("hunter2").unwrap();
        assert!(stored.starts_with("$argon2id$"), "got {}", stored);
        assert!(!stored.contains("hunter2"));

        let parsed = PasswordHash::new(&stored).unwrap();
        assert!(parsed.salt.is_some());
        assert!(parsed.params.iter().any(|(name, _)| name.as_str() == "m"));
    }

    #[test]
    fn test_same_password_gets_different_salt() {
        let first = hash_password("pw").unwrap();
        let second = hash_password("pw").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("pw", &first));
        assert!(verify_password("pw", &second));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("pw", "no-separator"));
        assert!(!verify_password("pw", ""));
        assert!(!verify_password("pw", "abcd$0123"));
    }

    #[test]
    fn test_token_issue_and_verify() {
        let codec = TokenCodec::new("secret", Duration::from_secs(3600));
        let token = codec.issue(42, Role::Admin).unwrap();
        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_token_with_other_secret_rejected() {
        let issuer = TokenCodec::new("one", Duration::from_secs(60));
        let verifier = TokenCodec::new("two", Duration::from_secs(60));
        let token = issuer.issue(1, Role::User).unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(StoreError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let codec = TokenCodec::new("secret", Duration::from_secs(60));
        assert!(codec.verify("not.a.jwt").is_err());
    }
}
