/// Shared JWT codec for the auth service
///
/// Signs and validates the access/refresh token pair using HS256 with a
/// process-wide secret. The codec is a plain value constructed from
/// configuration at startup and handed to consumers by injection, so there is
/// no global key state.
///
/// Access tokens carry the subject and its roles; refresh tokens carry only
/// their own lifetime. The subject association for a refresh token is
/// maintained externally by the session store.
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// JWT algorithm used for both token kinds.
const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

#[derive(Debug, Error)]
pub enum TokenError {
    /// Structural corruption: not a JWT, bad base64, bad JSON payload.
    #[error("malformed token")]
    Malformed,

    /// The signature does not verify against the configured secret.
    #[error("invalid token signature")]
    InvalidSignature,

    /// Signature and structure are valid but the token is past its expiry.
    /// The decoded claims ride along: the reissue flow identifies the
    /// refreshing subject from an expired access token.
    #[error("token expired")]
    Expired(Box<AccessClaims>),

    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Claims embedded in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user id)
    pub sub: String,
    /// Role names granted to the subject
    pub roles: Vec<String>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token type: always "access"
    pub token_type: String,
    /// Unique token id
    pub jti: String,
}

/// Claims embedded in a refresh token. Deliberately carries no subject or
/// roles; the session store owns the subject association.
#[derive(Debug, Serialize, Deserialize)]
struct RefreshClaims {
    iat: i64,
    exp: i64,
    token_type: String,
    jti: String,
}

/// Minimal view shared by both token kinds, for expiry-only checks.
#[derive(Debug, Deserialize)]
struct BaseClaims {
    exp: i64,
}

/// A freshly issued access/refresh pair.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Absolute refresh expiry, epoch milliseconds
    pub refresh_expires_at_ms: i64,
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &str, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::seconds(access_ttl_secs),
            refresh_ttl: Duration::seconds(refresh_ttl_secs),
        }
    }

    pub fn access_ttl_millis(&self) -> i64 {
        self.access_ttl.num_milliseconds()
    }

    pub fn refresh_ttl_millis(&self) -> i64 {
        self.refresh_ttl.num_milliseconds()
    }

    /// Issue a signed access/refresh pair for `subject`.
    ///
    /// Every token gets a fresh `jti`, so two pairs issued within the same
    /// second are still distinct values.
    pub fn issue(&self, subject: &str, roles: &[String]) -> Result<TokenPair, TokenError> {
        let now = Utc::now();
        let access_expiry = now + self.access_ttl;
        let refresh_expiry = now + self.refresh_ttl;

        let access_claims = AccessClaims {
            sub: subject.to_owned(),
            roles: roles.to_vec(),
            iat: now.timestamp(),
            exp: access_expiry.timestamp(),
            token_type: TOKEN_TYPE_ACCESS.to_owned(),
            jti: Uuid::new_v4().to_string(),
        };

        let refresh_claims = RefreshClaims {
            iat: now.timestamp(),
            exp: refresh_expiry.timestamp(),
            token_type: TOKEN_TYPE_REFRESH.to_owned(),
            jti: Uuid::new_v4().to_string(),
        };

        let header = Header::new(JWT_ALGORITHM);
        let access_token = encode(&header, &access_claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;
        let refresh_token = encode(&header, &refresh_claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            refresh_expires_at_ms: refresh_expiry.timestamp_millis(),
        })
    }

    /// Decode and verify an access token's claims.
    ///
    /// The signature is always enforced. An expired token yields
    /// `TokenError::Expired` with the claims still attached.
    pub fn parse_claims(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = false;

        let data = decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map_err(map_decode_error)?;

        let claims = data.claims;
        if claims.exp < Utc::now().timestamp() {
            return Err(TokenError::Expired(Box::new(claims)));
        }
        Ok(claims)
    }

    /// True only if the signature verifies and the token is unexpired.
    /// Works for either token kind.
    pub fn validate(&self, token: &str) -> bool {
        let validation = Validation::new(JWT_ALGORITHM);
        decode::<BaseClaims>(token, &self.decoding_key, &validation).is_ok()
    }

    /// Milliseconds until expiry, clamped at 0. The signature is still
    /// enforced; only the expiry check is skipped.
    pub fn remaining_lifetime_millis(&self, token: &str) -> Result<i64, TokenError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = false;

        let data = decode::<BaseClaims>(token, &self.decoding_key, &validation)
            .map_err(map_decode_error)?;

        let remaining = data.claims.exp * 1000 - Utc::now().timestamp_millis();
        Ok(remaining.max(0))
    }
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    }
}
