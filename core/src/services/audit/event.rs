//! Audit event definitions

use std::fmt;

use crate::domain::RateLimitScope;

/// Severity attached to an audit event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditLevel::Info => f.write_str("info"),
            AuditLevel::Warning => f.write_str("warning"),
            AuditLevel::Error => f.write_str("error"),
        }
    }
}

/// Decision or failure reported by the lifecycle manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditEvent {
    RequestReceived {
        phone: String,
        address: String,
    },
    InvalidPhoneNumber {
        phone: String,
        address: String,
    },
    /// The address keeps requesting codes; `attempt` counts the current request
    SequentialRequests {
        address: String,
        attempt: i32,
    },
    RateLimited {
        scope: RateLimitScope,
        phone: String,
        address: String,
        count: i32,
    },
    /// Stand-in for delivery: carries the full code
    OtpIssued {
        phone: String,
        code: String,
        reused: bool,
    },
    OtpVerified {
        phone: String,
    },
    OtpVerificationFailed {
        phone: String,
        submitted_code: String,
    },
    StoreFailure {
        operation: &'static str,
        phone: String,
        message: String,
    },
}

impl AuditEvent {
    pub fn level(&self) -> AuditLevel {
        match self {
            AuditEvent::RequestReceived { .. }
            | AuditEvent::OtpIssued { .. }
            | AuditEvent::OtpVerified { .. } => AuditLevel::Info,
            AuditEvent::InvalidPhoneNumber { .. }
            | AuditEvent::SequentialRequests { .. }
            | AuditEvent::RateLimited { .. }
            | AuditEvent::OtpVerificationFailed { .. } => AuditLevel::Warning,
            AuditEvent::StoreFailure { .. } => AuditLevel::Error,
        }
    }

    /// Stable event name, used as the `event` field in structured logs
    pub fn name(&self) -> &'static str {
        match self {
            AuditEvent::RequestReceived { .. } => "otp_request_received",
            AuditEvent::InvalidPhoneNumber { .. } => "invalid_phone_number",
            AuditEvent::SequentialRequests { .. } => "sequential_requests",
            AuditEvent::RateLimited { .. } => "rate_limit_exceeded",
            AuditEvent::OtpIssued { .. } => "otp_issued",
            AuditEvent::OtpVerified { .. } => "otp_verified",
            AuditEvent::OtpVerificationFailed { .. } => "otp_verification_failed",
            AuditEvent::StoreFailure { .. } => "store_failure",
        }
    }

    /// Phone number the event concerns, if any
    pub fn phone(&self) -> Option<&str> {
        match self {
            AuditEvent::RequestReceived { phone, .. }
            | AuditEvent::InvalidPhoneNumber { phone, .. }
            | AuditEvent::RateLimited { phone, .. }
            | AuditEvent::OtpIssued { phone, .. }
            | AuditEvent::OtpVerified { phone }
            | AuditEvent::OtpVerificationFailed { phone, .. }
            | AuditEvent::StoreFailure { phone, .. } => Some(phone),
            AuditEvent::SequentialRequests { .. } => None,
        }
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditEvent::RequestReceived { phone, address } => {
                write!(f, "OTP requested for {} from {}", phone, address)
            }
            AuditEvent::InvalidPhoneNumber { phone, .. } => {
                write!(f, "Invalid phone number: {}", phone)
            }
            AuditEvent::SequentialRequests { address, attempt } => write!(
                f,
                "Sequential OTP requests detected from {}, count: {}",
                address, attempt
            ),
            AuditEvent::RateLimited { scope: RateLimitScope::Address, address, count, .. } => {
                write!(f, "Rate limit exceeded for {}, count: {}", address, count)
            }
            AuditEvent::RateLimited { scope: RateLimitScope::Phone, phone, .. } => {
                write!(f, "Sequential OTP request blocked for phone: {}", phone)
            }
            AuditEvent::OtpIssued { phone, code, reused } => {
                let kind = if *reused { "reused" } else { "generated" };
                write!(f, "OTP {} for {}: {}", kind, phone, code)
            }
            AuditEvent::OtpVerified { phone } => write!(f, "OTP verified for {}", phone),
            AuditEvent::OtpVerificationFailed { phone, submitted_code } => {
                write!(f, "Invalid OTP attempt for {}: {}", phone, submitted_code)
            }
            AuditEvent::StoreFailure { operation, phone, message } => {
                write!(f, "Store failure during {} for {}: {}", operation, phone, message)
            }
        }
    }
}
