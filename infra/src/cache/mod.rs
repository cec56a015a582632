//! Cache module for the shared TTL store
//!
//! This module provides the TTL store implementations used by the OTP
//! lifecycle manager: a Redis-backed store with retry logic and an
//! in-process store for development and tests.

mod backend;
pub mod memory_store;
pub mod redis_client;
pub mod redis_store;

#[cfg(test)]
mod tests;

pub use backend::{connect_store, TtlStoreBackend};
pub use memory_store::InMemoryTtlStore;
pub use redis_client::RedisClient;
pub use redis_store::RedisTtlStore;

// Re-export commonly used types
pub use otp_shared::CacheConfig;
