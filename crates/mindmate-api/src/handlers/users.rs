//! Account HTTP handlers: signup, signin, current user.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use mindmate_core::defaults::PASSWORD_MIN_LENGTH;
use mindmate_core::{CreateUserRequest, PublicUser, UserRepository};

use crate::middleware::auth::AuthUser;
use crate::{ApiError, AppState};

// =============================================================================
// REQUEST/RESPONSE TYPES
// =============================================================================

/// Request body for account creation.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Request body for signing in.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response for signup/signin: a bearer token plus the public user.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

/// Minimal structural email check: one `@`, non-empty local part, and a dot
/// in the domain. Full RFC validation is not the goal; this rejects the
/// obviously malformed.
pub fn validate_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || local.contains(char::is_whitespace) {
        return false;
    }
    let mut domain_parts = domain.rsplitn(2, '.');
    let (Some(tld), Some(host)) = (domain_parts.next(), domain_parts.next()) else {
        return false;
    };
    !host.is_empty()
        && !tld.is_empty()
        && !domain.contains(char::is_whitespace)
        && !domain.contains('@')
}

fn require_credentials(
    email: Option<String>,
    password: Option<String>,
) -> Result<(String, String), ApiError> {
    match (email, password) {
        (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => Ok((e, p)),
        _ => Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        )),
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Create an account and issue a bearer token.
///
/// # Returns
/// - 201 Created with token and user on success
/// - 400 Bad Request on validation failure or duplicate email
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (email, password) = require_credentials(req.email, req.password)?;

    if !validate_email(&email) {
        return Err(ApiError::BadRequest("Invalid email format".to_string()));
    }
    if password.len() < PASSWORD_MIN_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Password must be at least {} characters long",
            PASSWORD_MIN_LENGTH
        )));
    }

    let password_hash = state.passwords.hash_password(&password)?;
    let user = state
        .db
        .users
        .create(CreateUserRequest {
            email,
            password_hash,
            name: req.name.filter(|n| !n.is_empty()),
        })
        .await?;

    info!(
        subsystem = "api",
        component = "users",
        op = "signup",
        user_id = %user.id,
        "User created"
    );

    let (token, _) = state.tokens.issue(user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            token,
            user: user.into(),
        }),
    ))
}

/// Verify credentials and issue a bearer token.
///
/// Unknown email and wrong password produce the same generic 401 so callers
/// cannot probe which accounts exist.
pub async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (email, password) = require_credentials(req.email, req.password)?;

    if !validate_email(&email) {
        return Err(ApiError::BadRequest("Invalid email format".to_string()));
    }

    let Some(user) = state.db.users.find_by_email(&email).await? else {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    };

    if !state
        .passwords
        .verify_password(&password, &user.password_hash)?
    {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let (token, _) = state.tokens.issue(user.id)?;

    Ok(Json(AuthResponse {
        message: "Signed in successfully".to_string(),
        token,
        user: user.into(),
    }))
}

/// Return the authenticated user's public profile.
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = state
        .db
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(serde_json::json!({ "user": user })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_accepts_common_forms() {
        assert!(validate_email("a@x.com"));
        assert!(validate_email("first.last@sub.example.org"));
    }

    #[test]
    fn test_validate_email_rejects_malformed() {
        assert!(!validate_email("no-at-sign"));
        assert!(!validate_email("@x.com"));
        assert!(!validate_email("a@nodot"));
        assert!(!validate_email("a b@x.com"));
        assert!(!validate_email("a@x .com"));
        assert!(!validate_email("a@@x.com"));
    }

    #[test]
    fn test_require_credentials_rejects_missing_fields() {
        assert!(require_credentials(None, Some("secret1".into())).is_err());
        assert!(require_credentials(Some("a@x.com".into()), None).is_err());
        assert!(require_credentials(Some(String::new()), Some("secret1".into())).is_err());

        let (e, p) = require_credentials(Some("a@x.com".into()), Some("secret1".into())).unwrap();
        assert_eq!(e, "a@x.com");
        assert_eq!(p, "secret1");
    }
}
