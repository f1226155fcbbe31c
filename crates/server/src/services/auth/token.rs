//! Session tokens.
//!
//! HS256 JWTs valid for seven days. The subject is the user id.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use lunnar_core::{Email, UserId};

use super::AuthError;

/// How long an issued token stays valid.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub username: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    /// Unique token id.
    pub jti: String,
}

impl Claims {
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::new(self.sub.clone())
    }
}

/// Issues and verifies session tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
        }
    }

    /// Sign a token for a user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenSigning` if encoding fails.
    pub fn issue(
        &self,
        user_id: &UserId,
        username: &str,
        email: &Email,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_owned(),
            email: email.as_str().to_owned(),
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign session token");
            AuthError::TokenSigning
        })
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` for malformed, expired or foreign tokens.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected session token");
                AuthError::InvalidToken
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email::parse("anna@lunnar.hu").unwrap()
    }

    fn service(secret: &str) -> TokenService {
        TokenService::new(&SecretString::from(secret))
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = service("k7#Vq2!mZ9@xL4$wR8^tN3&pB6*cJ1%h");
        let token = tokens.issue(&UserId::new("u-1"), "anna", &email()).unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.user_id(), UserId::new("u-1"));
        assert_eq!(claims.username, "anna");
        assert_eq!(claims.email, "anna@lunnar.hu");

        let lifetime = claims.exp - claims.iat;
        assert_eq!(lifetime, TOKEN_TTL_DAYS * 24 * 3600);
    }

    #[test]
    fn test_rejects_garbage() {
        let tokens = service("k7#Vq2!mZ9@xL4$wR8^tN3&pB6*cJ1%h");
        assert!(matches!(tokens.verify("not-a-token"), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_rejects_foreign_signature() {
        let ours = service("k7#Vq2!mZ9@xL4$wR8^tN3&pB6*cJ1%h");
        let theirs = service("Z1!aQ2@wS3#eD4$rF5%tG6^yH7&uJ8*i");
        let token = theirs.issue(&UserId::new("u-1"), "anna", &email()).unwrap();
        assert!(matches!(ours.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_rejects_expired() {
        let tokens = service("k7#Vq2!mZ9@xL4$wR8^tN3&pB6*cJ1%h");
        let past = Utc::now() - Duration::days(10);
        let claims = Claims {
            sub: "u-1".to_owned(),
            username: "anna".to_owned(),
            email: "anna@lunnar.hu".to_owned(),
            iat: past.timestamp(),
            exp: (past + Duration::days(1)).timestamp(),
            jti: "j".to_owned(),
        };
        let token = encode(&Header::default(), &claims, &tokens.encoding_key).unwrap();
        assert!(matches!(tokens.verify(&token), Err(AuthError::InvalidToken)));
    }
}
