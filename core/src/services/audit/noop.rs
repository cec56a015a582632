//! No-op implementation of AuditSink for when audit output is not needed

use super::{AuditEvent, AuditSink};

/// Audit sink that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpAuditSink;

impl NoOpAuditSink {
    pub fn new() -> Self {
        Self
    }
}

impl AuditSink for NoOpAuditSink {
    fn record(&self, _event: &AuditEvent) {}
}
