//! Business services and the seams they consume.

pub mod audit;
pub mod otp;
pub mod store;

// Re-export commonly used types
pub use audit::{AuditEvent, AuditLevel, AuditSink, MockAuditSink, NoOpAuditSink};
pub use otp::{
    CodeGenerator, OsRngCodeGenerator, OtpLifecycleManager, OtpPolicy, SeededCodeGenerator,
};
pub use store::TtlStore;
