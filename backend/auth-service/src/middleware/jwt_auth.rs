/// JWT authentication extractor for protected routes
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::AuthError;
use crate::models::Role;
use crate::AppState;

/// Verified subject and roles extracted from a bearer access token.
/// Extraction fails for missing, invalid, expired or blacklisted tokens.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub subject: String,
    pub roles: Vec<Role>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or(AuthError::InvalidAccessToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAccessToken)?;

        let claims = state.auth.verify_access(token).await?;
        let roles = claims
            .roles
            .iter()
            .filter_map(|name| Role::parse(name))
            .collect();

        Ok(AuthenticatedUser {
            subject: claims.sub,
            roles,
        })
    }
}
