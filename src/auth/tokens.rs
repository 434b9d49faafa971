//! Bearer token issuance and verification
//!
//! HS256 JWTs carrying the owner id as the `sub` claim. Issuance is the
//! proof of a successful register/login; extraction is deliberately
//! lenient because a bad token just means "treat the caller as a guest".

use crate::config::AUTH_TOKEN_TTL_DAYS;
use crate::error::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the owner id
    pub sub: String,
    pub email: String,
    /// Expiry (unix timestamp)
    pub exp: i64,
    /// Issued at (unix timestamp)
    pub iat: i64,
}

/// Signs and verifies bearer tokens with a shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a token for an authenticated owner.
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: (now + Duration::days(AUTH_TOKEN_TTL_DAYS)).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Extract the subject of a token, if it verifies.
    ///
    /// Any failure (malformed token, bad signature, expired, non-UUID
    /// subject) yields `None` rather than an error.
    pub fn subject_of(&self, token: &str) -> Option<Uuid> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).ok()?;
        Uuid::parse_str(&data.claims.sub).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_extract_subject() {
        let issuer = TokenIssuer::new("test-secret");
        let user_id = Uuid::new_v4();

        let token = issuer.issue(user_id, "user@example.com").unwrap();

        assert_eq!(issuer.subject_of(&token), Some(user_id));
    }

    #[test]
    fn test_garbage_token_yields_none() {
        let issuer = TokenIssuer::new("test-secret");

        assert_eq!(issuer.subject_of("not-a-jwt"), None);
        assert_eq!(issuer.subject_of(""), None);
        assert_eq!(issuer.subject_of("a.b.c"), None);
    }

    #[test]
    fn test_wrong_secret_yields_none() {
        let issuer = TokenIssuer::new("secret-one");
        let other = TokenIssuer::new("secret-two");

        let token = issuer.issue(Uuid::new_v4(), "user@example.com").unwrap();

        assert_eq!(other.subject_of(&token), None);
    }

    #[test]
    fn test_token_carries_email_claim() {
        let issuer = TokenIssuer::new("test-secret");
        let token = issuer.issue(Uuid::new_v4(), "someone@example.com").unwrap();

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(data.claims.email, "someone@example.com");
        assert!(data.claims.exp > data.claims.iat);
    }
}
