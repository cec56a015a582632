//! Shared TTL store seam
//!
//! The lifecycle manager keeps all of its state in a key/value store whose
//! writes carry an optional relative expiration. Expiry is the store's job;
//! nothing in this crate sweeps stale records.

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::StoreError;

/// Key/value store with per-key time-to-live
#[async_trait]
pub trait TtlStore: Send + Sync {
    /// Read raw bytes; `None` when the key is absent or expired
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Read a UTF-8 value; `None` when the key is absent or expired
    async fn get_string(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write raw bytes, replacing any previous value and expiration
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<(), StoreError>;

    /// Write a UTF-8 value, replacing any previous value and expiration
    async fn set_string(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), StoreError>;

    /// Remove a key; deleting an absent key is not an error
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Check whether a key is currently present
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Probe backend liveness for health reporting
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
