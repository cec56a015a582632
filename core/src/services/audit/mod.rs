//! Audit sink for OTP lifecycle events
//!
//! The manager reports every decision it takes as a leveled `AuditEvent`.
//! The sink is also the only delivery channel for issued codes.

mod event;
mod mock;
mod noop;


pub use event::{AuditEvent, AuditLevel};
pub use mock::MockAuditSink;
pub use noop::NoOpAuditSink;

/// Receiver of audit events
///
/// Recording is synchronous and infallible from the caller's side; a sink
/// that forwards to a slow backend must buffer on its own.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: &AuditEvent);
}
