//! Policy for the OTP lifecycle manager

use std::time::Duration;

use otp_shared::OtpPolicyConfig;

/// Limits and lifetimes applied by the lifecycle manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpPolicy {
    /// Accepted requests per source address within one window
    pub max_requests_per_address: i32,
    /// Counter values above this are audited as sequential behaviour
    pub sequential_warning_threshold: i32,
    /// Lifetime of the address counter, refreshed on every accepted request
    pub address_window: Duration,
    /// Lifetime of the phone issuance lock
    pub phone_cooldown: Duration,
    /// Lifetime of an issued code
    pub code_ttl: Duration,
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self {
            max_requests_per_address: 5,
            sequential_warning_threshold: 2,
            address_window: Duration::from_secs(60),
            phone_cooldown: Duration::from_secs(60),
            code_ttl: Duration::from_secs(5 * 60),
        }
    }
}

impl From<&OtpPolicyConfig> for OtpPolicy {
    fn from(config: &OtpPolicyConfig) -> Self {
        Self {
            max_requests_per_address: clamp_count(config.max_requests_per_address),
            sequential_warning_threshold: clamp_count(config.sequential_warning_threshold),
            address_window: Duration::from_secs(config.address_window_seconds),
            phone_cooldown: Duration::from_secs(config.phone_cooldown_seconds),
            code_ttl: Duration::from_secs(config.code_ttl_seconds),
        }
    }
}

// Counters are stored as i32
fn clamp_count(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
