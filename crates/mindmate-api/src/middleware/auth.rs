//! Bearer-token authentication extractor.
//!
//! Verifies the `Authorization: Bearer <token>` header and binds the decoded
//! user id into the handler. Any failure (missing header, malformed scheme,
//! expired or invalid token) short-circuits with 401 before handler logic
//! runs.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use uuid::Uuid;

use crate::{ApiError, AppState};

/// The authenticated caller, extracted from a verified bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

/// Split a header value of the form `Bearer <token>` into the token part.
pub fn parse_bearer(header_value: &str) -> Option<&str> {
    let token = header_value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Access token required".to_string()))?;

        let token = parse_bearer(header_value)
            .ok_or_else(|| ApiError::Unauthorized("Access token required".to_string()))?;

        let claims = state
            .tokens
            .verify(token)
            .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

        Ok(AuthUser(claims.user_id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer_extracts_token() {
        assert_eq!(parse_bearer("Bearer abc.def.ghi"), Some("abc.def.ghi"));
    }

    #[test]
    fn test_parse_bearer_rejects_other_schemes() {
        assert_eq!(parse_bearer("Basic dXNlcjpwYXNz"), None);
        assert_eq!(parse_bearer("abc.def.ghi"), None);
    }

    #[test]
    fn test_parse_bearer_rejects_empty_token() {
        assert_eq!(parse_bearer("Bearer "), None);
        assert_eq!(parse_bearer("Bearer    "), None);
    }
}
