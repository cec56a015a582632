//! Outcomes of an OTP request as seen by the calling layer

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dimension a request frequency ceiling applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitScope {
    /// Too many requests from one source address within the window
    Address,
    /// The phone number received a code within the cooldown
    Phone,
}

impl RateLimitScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateLimitScope::Address => "address",
            RateLimitScope::Phone => "phone",
        }
    }
}

impl fmt::Display for RateLimitScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of `request_otp`
///
/// Every variant maps to a stable machine code and a fixed default message;
/// store failures never leak past this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "scope", rename_all = "snake_case")]
pub enum OtpOutcome {
    Sent,
    InvalidPhoneNumber,
    RateLimitExceeded(RateLimitScope),
    TransientFailure,
}

impl OtpOutcome {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            OtpOutcome::Sent => "otp_sent",
            OtpOutcome::InvalidPhoneNumber => "invalid_phone_number",
            OtpOutcome::RateLimitExceeded(RateLimitScope::Address) => "rate_limit_address",
            OtpOutcome::RateLimitExceeded(RateLimitScope::Phone) => "rate_limit_phone",
            OtpOutcome::TransientFailure => "transient_failure",
        }
    }

    /// Default English message
    pub fn message(&self) -> &'static str {
        match self {
            OtpOutcome::Sent => "The code was issued successfully (recorded in the log).",
            OtpOutcome::InvalidPhoneNumber => "The phone number is invalid.",
            OtpOutcome::RateLimitExceeded(RateLimitScope::Address) => {
                "Too many requests from this address."
            }
            OtpOutcome::RateLimitExceeded(RateLimitScope::Phone) => {
                "Only one request per minute is allowed."
            }
            OtpOutcome::TransientFailure => "An error occurred. Please try again.",
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, OtpOutcome::Sent)
    }
}

impl fmt::Display for OtpOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
