//! Redis-backed TTL store

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use otp_core::{StoreError, TtlStore};

use super::redis_client::RedisClient;

/// `TtlStore` over a shared `RedisClient`
///
/// Values are stored as raw bytes; expiry is handled by Redis.
#[derive(Clone)]
pub struct RedisTtlStore {
    client: Arc<RedisClient>,
}

impl RedisTtlStore {
    pub fn new(client: Arc<RedisClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TtlStore for RedisTtlStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.client.get_bytes(key).await?)
    }

    async fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.client.get_bytes(key).await? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| StoreError::CorruptValue {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<(), StoreError> {
        Ok(self.client.set_with_expiry(key, value, ttl).await?)
    }

    async fn set_string(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), StoreError> {
        Ok(self.client.set_with_expiry(key, value.as_bytes(), ttl).await?)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.client.delete(key).await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        if self.client.health_check().await? {
            Ok(())
        } else {
            Err(StoreError::backend("unexpected PING response"))
        }
    }
}
