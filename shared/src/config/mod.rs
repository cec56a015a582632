//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Shared TTL store (Redis or in-memory) configuration
//! - `environment` - Environment detection and logging configuration
//! - `otp` - OTP issuance policy (quotas, cooldowns, code lifetime)
//! - `server` - HTTP server configuration

pub mod cache;
pub mod environment;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::{CacheConfig, CacheType};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpPolicyConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Shared TTL store configuration
    pub cache: CacheConfig,

    /// OTP issuance policy
    #[serde(default)]
    pub otp: OtpPolicyConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
            otp: OtpPolicyConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to the defaults of each sub-configuration.
    /// The logging configuration is derived from the detected environment
    /// and may be overridden with `RUST_LOG` and `LOG_FORMAT`.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            cache: CacheConfig::from_env(),
            otp: OtpPolicyConfig::from_env(),
            logging: LoggingConfig::for_environment(environment).with_env_overrides(),
        }
    }

    /// Validate the configuration before the application is wired up
    pub fn validate(&self) -> Result<(), String> {
        self.otp.validate()?;
        if self.server.port == 0 {
            return Err("Server port must not be zero".to_string());
        }
        Ok(())
    }
}
