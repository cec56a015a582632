//! Audit sink writing structured `tracing` events
//!
//! Each audit event becomes one log record with an `event = "<name>"` field
//! at the event's level. Phone numbers are masked except in `otp_issued`,
//! which stands in for delivery and therefore carries the full number and code.

use tracing::{error, info, warn};

use otp_core::{AuditEvent, AuditSink, RateLimitScope};
use otp_shared::phone::mask_phone_number;

/// Audit sink that forwards events to the installed `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl TracingAuditSink {
    pub fn new() -> Self {
        Self
    }
}

impl AuditSink for TracingAuditSink {
    fn record(&self, event: &AuditEvent) {
        let name = event.name();

        match event {
            AuditEvent::RequestReceived { phone, address } => info!(
                event = name,
                phone = %mask_phone_number(phone),
                address = %address,
                "OTP requested"
            ),
            AuditEvent::InvalidPhoneNumber { phone, address } => warn!(
                event = name,
                phone = %mask_phone_number(phone),
                address = %address,
                "Invalid phone number"
            ),
            AuditEvent::SequentialRequests { address, attempt } => warn!(
                event = name,
                address = %address,
                attempt = attempt,
                "Sequential OTP requests detected from {}, count: {}",
                address,
                attempt
            ),
            AuditEvent::RateLimited { scope: RateLimitScope::Address, phone, address, count } => warn!(
                event = name,
                scope = "address",
                phone = %mask_phone_number(phone),
                address = %address,
                count = count,
                "Rate limit exceeded for address {}",
                address
            ),
            AuditEvent::RateLimited { scope: RateLimitScope::Phone, phone, address, .. } => warn!(
                event = name,
                scope = "phone",
                phone = %mask_phone_number(phone),
                address = %address,
                "Sequential OTP request blocked for phone"
            ),
            AuditEvent::OtpIssued { phone, code, reused } => info!(
                event = name,
                phone = %phone,
                code = %code,
                reused = reused,
                "OTP generated for {}: {}",
                phone,
                code
            ),
            AuditEvent::OtpVerified { phone } => info!(
                event = name,
                phone = %mask_phone_number(phone),
                "OTP verified"
            ),
            AuditEvent::OtpVerificationFailed { phone, .. } => warn!(
                event = name,
                phone = %mask_phone_number(phone),
                "Invalid OTP attempt"
            ),
            AuditEvent::StoreFailure { operation, phone, message } => error!(
                event = name,
                operation = operation,
                phone = %mask_phone_number(phone),
                error = %message,
                "Store failure during {}",
                operation
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(events: &[AuditEvent]) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::TRACE)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let sink = TracingAuditSink::new();
            for event in events {
                sink.record(event);
            }
        });

        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_issued_event_logs_full_phone_and_code() {
        let output = capture(&[AuditEvent::OtpIssued {
            phone: "09123456789".to_string(),
            code: "482913".to_string(),
            reused: false,
        }]);

        assert!(output.contains("INFO"));
        assert!(output.contains("event=\"otp_issued\""));
        assert!(output.contains("OTP generated for 09123456789: 482913"));
    }

    #[test]
    fn test_other_events_mask_the_phone() {
        let output = capture(&[
            AuditEvent::OtpVerificationFailed {
                phone: "09123456789".to_string(),
                submitted_code: "000000".to_string(),
            },
            AuditEvent::StoreFailure {
                operation: "verify_otp",
                phone: "09123456789".to_string(),
                message: "connection refused".to_string(),
            },
        ]);

        assert!(output.contains("WARN"));
        assert!(output.contains("ERROR"));
        assert!(output.contains("0912****789"));
        assert!(!output.contains("09123456789"));
        assert!(!output.contains("000000"));
        assert!(output.contains("connection refused"));
    }
}
