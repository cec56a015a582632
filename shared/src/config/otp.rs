//! OTP issuance policy configuration

use serde::{Deserialize, Serialize};

/// Limits and lifetimes governing OTP issuance
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpPolicyConfig {
    /// Accepted requests per source address within one address window
    #[serde(default = "default_max_requests_per_address")]
    pub max_requests_per_address: u32,

    /// Counter values above this are flagged as sequential behaviour
    #[serde(default = "default_sequential_warning_threshold")]
    pub sequential_warning_threshold: u32,

    /// Lifetime of the per-address request counter in seconds
    #[serde(default = "default_window_seconds")]
    pub address_window_seconds: u64,

    /// Lifetime of the per-phone issuance lock in seconds
    #[serde(default = "default_window_seconds")]
    pub phone_cooldown_seconds: u64,

    /// Lifetime of an issued code in seconds
    #[serde(default = "default_code_ttl_seconds")]
    pub code_ttl_seconds: u64,
}

impl Default for OtpPolicyConfig {
    fn default() -> Self {
        Self {
            max_requests_per_address: default_max_requests_per_address(),
            sequential_warning_threshold: default_sequential_warning_threshold(),
            address_window_seconds: default_window_seconds(),
            phone_cooldown_seconds: default_window_seconds(),
            code_ttl_seconds: default_code_ttl_seconds(),
        }
    }
}

impl OtpPolicyConfig {
    /// Create from environment variables (`OTP_*`)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_requests_per_address: env_or(
                "OTP_MAX_REQUESTS_PER_ADDRESS",
                defaults.max_requests_per_address,
            ),
            sequential_warning_threshold: env_or(
                "OTP_SEQUENTIAL_WARNING_THRESHOLD",
                defaults.sequential_warning_threshold,
            ),
            address_window_seconds: env_or(
                "OTP_ADDRESS_WINDOW_SECONDS",
                defaults.address_window_seconds,
            ),
            phone_cooldown_seconds: env_or(
                "OTP_PHONE_COOLDOWN_SECONDS",
                defaults.phone_cooldown_seconds,
            ),
            code_ttl_seconds: env_or("OTP_CODE_TTL_SECONDS", defaults.code_ttl_seconds),
        }
    }

    /// Reject policies that would disable a limit or make records immortal
    pub fn validate(&self) -> Result<(), String> {
        if self.max_requests_per_address == 0 {
            return Err("OTP max_requests_per_address must be greater than zero".to_string());
        }
        if self.address_window_seconds == 0
            || self.phone_cooldown_seconds == 0
            || self.code_ttl_seconds == 0
        {
            return Err("OTP windows and code lifetime must be greater than zero".to_string());
        }
        Ok(())
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn default_max_requests_per_address() -> u32 {
    5
}

fn default_sequential_warning_threshold() -> u32 {
    2
}

fn default_window_seconds() -> u64 {
    60
}

fn default_code_ttl_seconds() -> u64 {
    300 // 5 minutes
}
