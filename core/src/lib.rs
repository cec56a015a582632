//! # OTP Core
//!
//! Core business logic for the OTP service.
//! This crate contains the domain types, the error taxonomy, the seams to the
//! TTL store, audit sink and random source, and the `OtpLifecycleManager`
//! that applies the issuance and verification rules over them.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
