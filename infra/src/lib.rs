//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer of the OTP service.
//! It provides the concrete implementations behind the seams defined in
//! `otp_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis client with retry, Redis-backed and in-memory TTL stores
//! - **Audit**: tracing-backed audit sink
//! - **Config**: environment and `.env` loading

use otp_core::StoreError;
use otp_shared::{AppConfig, Environment};

/// Cache module - Redis client and TTL store implementations
pub mod cache;

/// Audit module - audit sink implementations
pub mod audit;

pub use audit::TracingAuditSink;
pub use cache::{connect_store, InMemoryTtlStore, RedisClient, RedisTtlStore, TtlStoreBackend};

/// Load application configuration from the environment
///
/// Reads the environment-specific file (`.env.development`, ...) first and
/// then `.env`; variables already set in the process win over both.
/// Nothing is logged here: this runs before the tracing subscriber exists,
/// so callers report the result once logging is installed.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    config.validate().map_err(InfrastructureError::Config)?;
    Ok(config)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for StoreError {
    fn from(error: InfrastructureError) -> Self {
        StoreError::backend(error.to_string())
    }
}
