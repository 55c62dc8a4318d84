//! JWT token creation and validation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use mindmate_core::defaults::TOKEN_TTL_HOURS;
use mindmate_core::{Error, Result};

use crate::claims::Claims;

/// Creates and validates signed bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Token TTL in hours.
    ttl_hours: i64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_hours", &self.ttl_hours)
            .finish()
    }
}

impl TokenService {
    /// Creates a new token service from a shared secret.
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_hours,
        }
    }

    /// Creates a token service from environment variables.
    ///
    /// `JWT_SECRET` is required; `TOKEN_TTL_HOURS` defaults to 24.
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| Error::Config("JWT_SECRET is not set".to_string()))?;
        let ttl_hours = std::env::var("TOKEN_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(TOKEN_TTL_HOURS);

        Ok(Self::new(&secret, ttl_hours))
    }

    /// Issues a signed token for the given user, returning the token and its
    /// expiration timestamp.
    pub fn issue(&self, user_id: Uuid) -> Result<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let exp = now + chrono::Duration::hours(self.ttl_hours);

        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| Error::Internal(format!("Failed to encode token: {e}")))?;

        Ok((token, exp))
    }

    /// Decodes and validates a token string.
    ///
    /// Checks signature validity and expiration; every failure maps to
    /// `Error::Unauthorized` with a short reason.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        Error::Unauthorized("Token has expired".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        Error::Unauthorized("Invalid token format".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        Error::Unauthorized("Invalid token signature".to_string())
                    }
                    _ => Error::Unauthorized(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-for-unit-tests", 24)
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let svc = service();
        let user_id = Uuid::new_v4();

        let (token, exp) = svc.issue(user_id).unwrap();
        assert!(exp > Utc::now());

        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.exp, exp.timestamp());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let svc = service();
        let err = svc.verify("not-a-jwt").unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let svc = service();
        let other = TokenService::new("a-different-secret", 24);

        let (token, _) = svc.issue(Uuid::new_v4()).unwrap();
        let err = other.verify(&token).unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // Negative TTL produces a token that expired before issuance.
        let svc = TokenService::new("test-secret-for-unit-tests", -1);
        let (token, _) = svc.issue(Uuid::new_v4()).unwrap();

        let err = service().verify(&token).unwrap_err();
        match err {
            Error::Unauthorized(msg) => assert!(msg.contains("expired")),
            other => panic!("Expected Unauthorized, got {other:?}"),
        }
    }
}
