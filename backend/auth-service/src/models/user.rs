/// User identity and request/response types
use serde::{Deserialize, Serialize};
use token_codec::TokenPair;
use validator::Validate;

/// Roles a user can hold, mapped to the stored role-name strings by
/// `as_str`/`parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Admin => "ROLE_ADMIN",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "ROLE_USER" => Some(Role::User),
            "ROLE_ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// A registered identity. Immutable id/email once created; the password
/// is only ever held as a hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
}

// Request/Response DTOs. Field shape (id pattern, email format, password
// strength) is enforced by the orchestrator via `validators` and
// `security::password`; the derive covers presence and length.

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 6, max = 12, message = "id must be 6-12 chars"))]
    pub id: String,

    #[validate(email(message = "invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "id is required"))]
    pub id: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReissueRequest {
    #[validate(length(min = 1, message = "access_token is required"))]
    pub access_token: String,

    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LogoutRequest {
    #[validate(length(min = 1, message = "access_token is required"))]
    pub access_token: String,
}

/// Non-sensitive projection returned from sign-up and profile lookups.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        UserInfo {
            id: user.id.clone(),
            email: user.email.clone(),
        }
    }
}

/// Token pair payload returned from login and reissue.
#[derive(Debug, Serialize)]
pub struct TokenInfo {
    pub grant_type: String,
    pub access_token: String,
    pub refresh_token: String,
    /// Absolute refresh expiry, epoch milliseconds
    pub refresh_token_expires_at: i64,
}

impl From<TokenPair> for TokenInfo {
    fn from(pair: TokenPair) -> Self {
        TokenInfo {
            grant_type: "Bearer".to_string(),
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            refresh_token_expires_at: pair.refresh_expires_at_ms,
        }
    }
}
