//! Recording implementation of AuditSink for testing.

use std::sync::{Arc, Mutex};

use super::{AuditEvent, AuditSink};

/// Audit sink that keeps every event in memory
///
/// Clones share the same event log, so a test can hand one clone to the
/// manager and inspect the other.
#[derive(Clone, Default)]
pub struct MockAuditSink {
    events: Arc<Mutex<Vec<AuditEvent>>>,
}

impl MockAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded events in order
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Names of recorded events in order
    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(AuditEvent::name).collect()
    }

    /// Number of recorded events with the given name
    pub fn count(&self, name: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.name() == name)
            .count()
    }

    /// Most recent code issued to a phone number
    pub fn last_issued_code(&self, phone: &str) -> Option<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|event| match event {
                AuditEvent::OtpIssued { phone: p, code, .. } if p == phone => Some(code.clone()),
                _ => None,
            })
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl AuditSink for MockAuditSink {
    fn record(&self, event: &AuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
