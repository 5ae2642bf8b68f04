/// Core authentication and session lifecycle logic.
///
/// Coordinates the credential store, password hasher, token codec and
/// session store for sign-up, login, token reissue and logout. Holds no
/// state of its own; every session fact lives in the external store, so the
/// service can be cloned and replicated freely.
use std::sync::Arc;

use token_codec::{AccessClaims, TokenCodec, TokenError, TokenPair};

use crate::db::CredentialStore;
use crate::error::{AuthError, AuthResult};
use crate::models::{Role, User, UserInfo};
use crate::security::password::{self, PasswordHasher};
use crate::store::{blacklist_key, refresh_token_key, SessionStore};
use crate::validators;

/// Marker value stored under a blacklist key
const BLACKLIST_MARKER: &str = "access_token";

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    codec: TokenCodec,
    sessions: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        codec: TokenCodec,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            users,
            hasher,
            codec,
            sessions,
        }
    }

    /// Create a new identity with the default role. Returns only the
    /// non-sensitive projection.
    pub async fn register(&self, id: &str, email: &str, password: &str) -> AuthResult<UserInfo> {
        if !validators::validate_user_id(id) {
            return Err(AuthError::Validation(
                "id must be 6-12 chars, starting with a letter".to_string(),
            ));
        }
        if !validators::validate_email(email) {
            return Err(AuthError::Validation("invalid email format".to_string()));
        }

        if self.users.exists_by_id(id).await? {
            return Err(AuthError::DuplicateIdentity);
        }
        if self.users.exists_by_email(email).await? {
            return Err(AuthError::DuplicateIdentity);
        }

        password::validate_strength(password)?;
        let password_hash = self.hasher.hash(password)?;

        let user = User {
            id: id.to_owned(),
            email: email.to_owned(),
            password_hash,
            roles: vec![Role::User],
        };
        let user = self.users.save(&user).await?;

        tracing::info!("user registered: {}", user.id);
        Ok(UserInfo::from(&user))
    }

    /// Verify credentials and open a session: issue a token pair and store
    /// the refresh token under the subject's key, displacing any previous
    /// session for that subject.
    pub async fn login(&self, id: &str, password: &str) -> AuthResult<TokenPair> {
        // Unknown id falls through to the same failure as a bad password.
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(AuthError::AuthenticationFailed)?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AuthError::AuthenticationFailed);
        }

        let roles: Vec<String> = user.roles.iter().map(|r| r.as_str().to_owned()).collect();
        let pair = self.codec.issue(&user.id, &roles)?;

        self.sessions
            .put(
                &refresh_token_key(&user.id),
                &pair.refresh_token,
                self.codec.refresh_ttl_millis(),
            )
            .await?;

        tracing::info!("user logged in: {}", user.id);
        Ok(pair)
    }

    /// Rotate the token pair. The old access token may be expired; its
    /// subject is still trusted because the signature is verified. The
    /// session entry is only touched after every check has passed.
    pub async fn reissue(&self, access_token: &str, refresh_token: &str) -> AuthResult<TokenPair> {
        if !self.codec.validate(refresh_token) {
            return Err(AuthError::InvalidRefreshToken);
        }

        let claims = self.claims_allowing_expiry(access_token)?;

        let key = refresh_token_key(&claims.sub);
        let stored = self
            .sessions
            .get(&key)
            .await?
            .ok_or(AuthError::NoActiveSession)?;

        // A stale value here means the presented token was already rotated
        // away (or another device logged in since).
        if stored != refresh_token {
            return Err(AuthError::RefreshTokenMismatch);
        }

        let pair = self.codec.issue(&claims.sub, &claims.roles)?;
        self.sessions
            .put(&key, &pair.refresh_token, self.codec.refresh_ttl_millis())
            .await?;

        tracing::info!("tokens reissued for: {}", claims.sub);
        Ok(pair)
    }

    /// Close the subject's session and blacklist the access token for its
    /// remaining lifetime. Deleting an already-absent session is not an
    /// error, so logout is idempotent.
    pub async fn logout(&self, access_token: &str) -> AuthResult<()> {
        if !self.codec.validate(access_token) {
            return Err(AuthError::InvalidAccessToken);
        }

        let claims = self.claims_allowing_expiry(access_token)?;

        self.sessions
            .delete(&refresh_token_key(&claims.sub))
            .await?;

        let remaining = self.codec.remaining_lifetime_millis(access_token)?;
        if remaining > 0 {
            self.sessions
                .put(&blacklist_key(access_token), BLACKLIST_MARKER, remaining)
                .await?;
        }

        tracing::info!("user logged out: {}", claims.sub);
        Ok(())
    }

    /// Full access-token check for request guards: signature, expiry and
    /// blacklist membership.
    pub async fn verify_access(&self, access_token: &str) -> AuthResult<AccessClaims> {
        if !self.codec.validate(access_token) {
            return Err(AuthError::InvalidAccessToken);
        }

        if self
            .sessions
            .get(&blacklist_key(access_token))
            .await?
            .is_some()
        {
            return Err(AuthError::InvalidAccessToken);
        }

        match self.codec.parse_claims(access_token) {
            Ok(claims) => Ok(claims),
            Err(TokenError::Expired(_)) => Err(AuthError::InvalidAccessToken),
            Err(err) => Err(err.into()),
        }
    }

    /// Profile projection for an authenticated subject.
    pub async fn current_user(&self, subject: &str) -> AuthResult<UserInfo> {
        let user = self
            .users
            .find_by_id(subject)
            .await?
            .ok_or(AuthError::InvalidAccessToken)?;

        Ok(UserInfo::from(&user))
    }

    // `validate` passes tokens inside the decoder's expiry leeway, so an
    // access token can be valid for the caller yet already past `exp` here.
    fn claims_allowing_expiry(&self, access_token: &str) -> AuthResult<AccessClaims> {
        match self.codec.parse_claims(access_token) {
            Ok(claims) => Ok(claims),
            Err(TokenError::Expired(claims)) => Ok(*claims),
            Err(err) => Err(err.into()),
        }
    }
}
