/// Redis-backed session and blacklist storage
use async_trait::async_trait;
use redis::aio::ConnectionManager;

use crate::error::{AuthError, AuthResult};
use crate::store::SessionStore;

#[derive(Clone)]
pub struct RedisSessionStore {
    redis: ConnectionManager,
}

impl RedisSessionStore {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    /// `SET key value PX ttl`. Callers only pass positive TTLs.
    async fn put(&self, key: &str, value: &str, ttl_millis: i64) -> AuthResult<()> {
        let mut redis = self.redis.clone();
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("PX")
            .arg(ttl_millis)
            .query_async::<_, ()>(&mut redis)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, key: &str) -> AuthResult<Option<String>> {
        let mut redis = self.redis.clone();
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut redis)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        Ok(value)
    }

    async fn delete(&self, key: &str) -> AuthResult<()> {
        let mut redis = self.redis.clone();
        redis::cmd("DEL")
            .arg(key)
            .query_async::<_, ()>(&mut redis)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        Ok(())
    }
}
