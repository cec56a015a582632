//! OTP lifecycle module
//!
//! This module provides the complete one-time passcode workflow:
//! - Phone number validation
//! - Per-address request quota and per-phone cooldown
//! - Code issuance with reuse of an unexpired code
//! - One-time verification that consumes the code

mod config;
mod generator;
mod service;

#[cfg(test)]
mod tests;

pub use config::OtpPolicy;
pub use generator::{CodeGenerator, OsRngCodeGenerator, SeededCodeGenerator, CODE_MAX, CODE_MIN};
pub use service::OtpLifecycleManager;
