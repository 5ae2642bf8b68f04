/// Session and blacklist key-value storage
///
/// One trait covers both concerns: the per-subject refresh-token entry and
/// the revoked-access-token blacklist are plain TTL'd key-value records in
/// the same external store. Keys are namespaced by prefix.
pub mod redis_store;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::error::AuthResult;

pub use redis_store::RedisSessionStore;

const REFRESH_KEY_PREFIX: &str = "RT:";
const BLACKLIST_KEY_PREFIX: &str = "BL:";

/// TTL'd key-value boundary. Expiry is store-native; no multi-key
/// transactions are assumed.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn put(&self, key: &str, value: &str, ttl_millis: i64) -> AuthResult<()>;
    async fn get(&self, key: &str) -> AuthResult<Option<String>>;
    async fn delete(&self, key: &str) -> AuthResult<()>;
}

/// Key of a subject's single active refresh-token entry.
pub fn refresh_token_key(subject: &str) -> String {
    format!("{}{}", REFRESH_KEY_PREFIX, subject)
}

/// Blacklist key for a revoked access token, keyed by SHA-256 of the raw
/// value so keys stay bounded in size.
pub fn blacklist_key(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{}{:x}", BLACKLIST_KEY_PREFIX, hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_key_is_per_subject() {
        assert_eq!(refresh_token_key("alice01"), "RT:alice01");
        assert_ne!(refresh_token_key("alice01"), refresh_token_key("bob02"));
    }

    #[test]
    fn test_blacklist_key_is_stable_and_distinct() {
        let first = blacklist_key("token-a");
        assert_eq!(first, blacklist_key("token-a"));
        assert_ne!(first, blacklist_key("token-b"));
        assert!(first.starts_with("BL:"));
    }
}
