/// Authentication handlers
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use validator::Validate;

use crate::error::AuthError;
use crate::middleware::AuthenticatedUser;
use crate::models::{
    LoginRequest, LogoutRequest, ReissueRequest, SignUpRequest, TokenInfo, UserInfo,
};
use crate::AppState;

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Sign-up endpoint handler
pub async fn sign_up(
    State(state): State<AppState>,
    Json(payload): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<UserInfo>), AuthError> {
    payload
        .validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let info = state
        .auth
        .register(&payload.id, &payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(info)))
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenInfo>, AuthError> {
    payload
        .validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let pair = state.auth.login(&payload.id, &payload.password).await?;

    Ok(Json(TokenInfo::from(pair)))
}

/// Token reissue endpoint handler
pub async fn reissue(
    State(state): State<AppState>,
    Json(payload): Json<ReissueRequest>,
) -> Result<Json<TokenInfo>, AuthError> {
    payload
        .validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let pair = state
        .auth
        .reissue(&payload.access_token, &payload.refresh_token)
        .await?;

    Ok(Json(TokenInfo::from(pair)))
}

/// Logout endpoint handler
pub async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<LogoutRequest>,
) -> Result<Json<LogoutResponse>, AuthError> {
    payload
        .validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    state.auth.logout(&payload.access_token).await?;

    Ok(Json(LogoutResponse {
        message: "logged out".to_string(),
    }))
}

/// Current-user endpoint handler; requires a valid, non-blacklisted bearer
/// token.
pub async fn me(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UserInfo>, AuthError> {
    let info = state.auth.current_user(&user.subject).await?;

    Ok(Json(info))
}
