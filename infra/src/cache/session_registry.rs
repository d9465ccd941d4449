//! Redis-backed session registry

use async_trait::async_trait;
use tracing::debug;

use jr_core::errors::SessionError;
use jr_core::repositories::SessionRegistry;
use jr_shared::config::CacheConfig;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// Session registry storing one Redis key per live session
///
/// Entry expiry is delegated to Redis key TTLs, so lapsed sessions vanish
/// without any sweeping on our side.
#[derive(Clone)]
pub struct RedisSessionRegistry {
    client: RedisClient,
}

impl RedisSessionRegistry {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Connect to Redis and wrap the connection in a registry
    pub async fn connect(config: CacheConfig) -> Result<Self, InfrastructureError> {
        Ok(Self::new(RedisClient::new(config).await?))
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    /// Whether the Redis server answers PING
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        self.client.health_check().await
    }
}

#[async_trait]
impl SessionRegistry for RedisSessionRegistry {
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> Result<(), SessionError> {
        if ttl_seconds == Some(0) {
            return Err(SessionError::registry("invalid expire time in 'set' command"));
        }
        self.client.set(key, value, ttl_seconds).await?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, SessionError> {
        Ok(self.client.exists(key).await?)
    }

    async fn del(&self, key: &str) -> Result<bool, SessionError> {
        Ok(self.client.delete(key).await?)
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<bool, SessionError> {
        let refreshed = self.client.expire(key, ttl_seconds).await?;
        debug!("EXPIRE '{}' {}s -> {}", key, ttl_seconds, refreshed);
        Ok(refreshed)
    }
}
