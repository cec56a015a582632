//! Domain layer: record keys, value encodings and request outcomes.

pub mod keys;
pub mod outcome;

// Re-export commonly used domain types
pub use outcome::{OtpOutcome, RateLimitScope};
