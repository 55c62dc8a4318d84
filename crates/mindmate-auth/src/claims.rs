//! JWT claims structure embedded in every issued token.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims payload for a mindmate bearer token.
///
/// Tokens are issued only at signup/signin and expire 24 hours after
/// issuance; there is no refresh mechanism, so a second token type is not
/// needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_user_id() {
        let id = Uuid::new_v4();
        let claims = Claims {
            sub: id,
            iat: 0,
            exp: i64::MAX,
        };
        assert_eq!(claims.user_id(), id);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_claims_expired_in_the_past() {
        let claims = Claims {
            sub: Uuid::nil(),
            iat: 0,
            exp: 1,
        };
        assert!(claims.is_expired());
    }

    #[test]
    fn test_claims_serde_roundtrip() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: 1_700_000_000,
            exp: 1_700_086_400,
        };
        let json = serde_json::to_string(&claims).unwrap();
        let back: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sub, claims.sub);
        assert_eq!(back.exp, claims.exp);
    }
}
