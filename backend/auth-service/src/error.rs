use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use token_codec::TokenError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Sign-up id or email collides with an existing identity
    #[error("duplicate identity")]
    DuplicateIdentity,

    /// Bad credentials. Also returned for an unknown id so callers cannot
    /// probe which ids exist.
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("invalid refresh token")]
    InvalidRefreshToken,

    #[error("malformed token")]
    MalformedToken,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("token expired")]
    ExpiredToken,

    /// No session entry for the subject (logged out or expired)
    #[error("no active session")]
    NoActiveSession,

    /// Presented refresh token differs from the stored one (stale or replayed)
    #[error("refresh token mismatch")]
    RefreshTokenMismatch,

    #[error("invalid access token")]
    InvalidAccessToken,

    #[error("weak password")]
    WeakPassword,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("internal server error: {0}")]
    Internal(String),
}

pub type AuthResult<T> = std::result::Result<T, AuthError>;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AuthError::DuplicateIdentity => (
                StatusCode::CONFLICT,
                "id or email already registered".to_string(),
            ),
            AuthError::AuthenticationFailed => (
                StatusCode::UNAUTHORIZED,
                "invalid id or password".to_string(),
            ),
            AuthError::InvalidRefreshToken
            | AuthError::MalformedToken
            | AuthError::InvalidSignature
            | AuthError::ExpiredToken
            | AuthError::NoActiveSession
            | AuthError::RefreshTokenMismatch
            | AuthError::InvalidAccessToken => (StatusCode::UNAUTHORIZED, self.to_string()),
            AuthError::WeakPassword => (
                StatusCode::BAD_REQUEST,
                "password must be 8-16 chars with a letter, a digit and a special character"
                    .to_string(),
            ),
            AuthError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AuthError::Database(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("db error: {}", msg))
            }
            AuthError::Store(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("store error: {}", msg),
            ),
            AuthError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed => AuthError::MalformedToken,
            TokenError::InvalidSignature => AuthError::InvalidSignature,
            TokenError::Expired(_) => AuthError::ExpiredToken,
            TokenError::Signing(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Database(err.to_string())
    }
}

impl From<redis::RedisError> for AuthError {
    fn from(err: redis::RedisError) -> Self {
        AuthError::Store(err.to_string())
    }
}
