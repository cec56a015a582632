//! Store selection from configuration

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use otp_core::{StoreError, TtlStore};
use otp_shared::{CacheConfig, CacheType};

use super::memory_store::InMemoryTtlStore;
use super::redis_client::RedisClient;
use super::redis_store::RedisTtlStore;
use crate::InfrastructureError;

/// The configured TTL store backend
#[derive(Clone)]
pub enum TtlStoreBackend {
    Redis(RedisTtlStore),
    Memory(InMemoryTtlStore),
}

impl TtlStoreBackend {
    pub fn kind(&self) -> &'static str {
        match self {
            TtlStoreBackend::Redis(_) => "redis",
            TtlStoreBackend::Memory(_) => "memory",
        }
    }
}

/// Build the store selected by `config.cache_type`
///
/// For Redis this connects eagerly, so an unreachable server fails startup.
pub async fn connect_store(config: &CacheConfig) -> Result<TtlStoreBackend, InfrastructureError> {
    match config.cache_type {
        CacheType::Redis => {
            let client = RedisClient::new(config.clone()).await?;
            Ok(TtlStoreBackend::Redis(RedisTtlStore::new(Arc::new(client))))
        }
        CacheType::Memory => {
            tracing::warn!("Using in-memory TTL store; records are not shared between processes");
            Ok(TtlStoreBackend::Memory(InMemoryTtlStore::new()))
        }
    }
}

#[async_trait]
impl TtlStore for TtlStoreBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match self {
            TtlStoreBackend::Redis(store) => store.get(key).await,
            TtlStoreBackend::Memory(store) => store.get(key).await,
        }
    }

    async fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            TtlStoreBackend::Redis(store) => store.get_string(key).await,
            TtlStoreBackend::Memory(store) => store.get_string(key).await,
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<(), StoreError> {
        match self {
            TtlStoreBackend::Redis(store) => store.set(key, value, ttl).await,
            TtlStoreBackend::Memory(store) => store.set(key, value, ttl).await,
        }
    }

    async fn set_string(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), StoreError> {
        match self {
            TtlStoreBackend::Redis(store) => store.set_string(key, value, ttl).await,
            TtlStoreBackend::Memory(store) => store.set_string(key, value, ttl).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        match self {
            TtlStoreBackend::Redis(store) => store.delete(key).await,
            TtlStoreBackend::Memory(store) => store.delete(key).await,
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        match self {
            TtlStoreBackend::Redis(store) => store.health_check().await,
            TtlStoreBackend::Memory(store) => store.health_check().await,
        }
    }
}
