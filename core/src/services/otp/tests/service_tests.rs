//! Unit tests for the OTP lifecycle manager

use std::sync::Arc;
use std::time::Duration;

use crate::domain::keys::{self, PHONE_LOCK_SENTINEL};
use crate::domain::{OtpOutcome, RateLimitScope};
use crate::services::audit::{AuditEvent, MockAuditSink};
use crate::services::otp::{OtpLifecycleManager, OtpPolicy};

use super::mocks::{MockTtlStore, ScriptedCodeGenerator};

const PHONE: &str = "09123456789";
const ADDRESS: &str = "192.168.1.10";

type TestManager = OtpLifecycleManager<MockTtlStore, ScriptedCodeGenerator, MockAuditSink>;

fn manager_with(store: MockTtlStore, codes: &[&str]) -> (TestManager, MockTtlStore, MockAuditSink) {
    let audit = MockAuditSink::new();
    let manager = OtpLifecycleManager::new(
        Arc::new(store.clone()),
        Arc::new(ScriptedCodeGenerator::new(codes)),
        Arc::new(audit.clone()),
        OtpPolicy::default(),
    );
    (manager, store, audit)
}

fn manager() -> (TestManager, MockTtlStore, MockAuditSink) {
    manager_with(MockTtlStore::new(), &["482913", "550071", "918273"])
}

fn phone(n: u32) -> String {
    format!("0912000{:04}", n)
}

#[tokio::test]
async fn test_invalid_phone_numbers_never_touch_the_store() {
    let (manager, store, audit) = manager();

    for input in ["", "9123456789", "0912345678", "091234567890", "08123456789", "+989123456789", "0912345678a", " 09123456789"] {
        let outcome = manager.request_otp(input, Some(ADDRESS)).await;
        assert_eq!(outcome, OtpOutcome::InvalidPhoneNumber, "input {:?}", input);
    }

    assert_eq!(store.operation_count(), 0);
    assert_eq!(audit.count("invalid_phone_number"), 8);
    assert_eq!(audit.count("otp_issued"), 0);
}

#[tokio::test]
async fn test_request_otp_success_writes_all_three_records() {
    let (manager, store, audit) = manager();

    let outcome = manager.request_otp(PHONE, Some(ADDRESS)).await;
    assert_eq!(outcome, OtpOutcome::Sent);

    assert_eq!(store.live_string(&keys::active_code_key(PHONE)), Some("482913".to_string()));
    assert_eq!(
        store.live_string(&keys::phone_lock_key(PHONE)),
        Some(PHONE_LOCK_SENTINEL.to_string())
    );
    assert_eq!(
        store.live_value(&keys::address_counter_key(ADDRESS)),
        Some(keys::encode_counter(1).to_vec())
    );

    assert_eq!(audit.last_issued_code(PHONE), Some("482913".to_string()));
    assert_eq!(audit.event_names(), vec!["otp_request_received", "otp_issued"]);
}

#[tokio::test]
async fn test_round_trip_verifies_exactly_once() {
    let (manager, store, audit) = manager();

    assert_eq!(manager.request_otp(PHONE, Some(ADDRESS)).await, OtpOutcome::Sent);
    let code = audit.last_issued_code(PHONE).unwrap();

    assert!(manager.verify_otp(PHONE, &code).await);
    assert!(store.live_value(&keys::active_code_key(PHONE)).is_none());
    assert!(!manager.verify_otp(PHONE, &code).await);

    assert_eq!(audit.count("otp_verified"), 1);
    assert_eq!(audit.count("otp_verification_failed"), 1);
}

#[tokio::test]
async fn test_wrong_code_keeps_active_code() {
    let (manager, store, _audit) = manager();
    manager.request_otp(PHONE, Some(ADDRESS)).await;

    assert!(!manager.verify_otp(PHONE, "000000").await);
    assert!(!manager.verify_otp(PHONE, " 482913").await);
    assert!(!manager.verify_otp(PHONE, "48291").await);
    assert!(store.live_value(&keys::active_code_key(PHONE)).is_some());

    // No attempt limit: the right code still works after misses
    assert!(manager.verify_otp(PHONE, "482913").await);
}

#[tokio::test]
async fn test_verify_never_requested_phone_is_false() {
    let (manager, _store, audit) = manager();

    assert!(!manager.verify_otp("09350000000", "123456").await);
    assert_eq!(
        audit.events().last(),
        Some(&AuditEvent::OtpVerificationFailed {
            phone: "09350000000".to_string(),
            submitted_code: "123456".to_string(),
        })
    );
}

#[tokio::test]
async fn test_phone_cooldown_applies_across_addresses() {
    let (manager, _store, audit) = manager();

    assert_eq!(manager.request_otp(PHONE, Some(ADDRESS)).await, OtpOutcome::Sent);
    assert_eq!(
        manager.request_otp(PHONE, Some("10.0.0.99")).await,
        OtpOutcome::RateLimitExceeded(RateLimitScope::Phone)
    );
    assert_eq!(audit.count("otp_issued"), 1);
    assert_eq!(audit.count("rate_limit_exceeded"), 1);
}

#[tokio::test]
async fn test_sixth_request_from_one_address_is_rate_limited() {
    let (manager, store, audit) = manager();

    for n in 0..5 {
        assert_eq!(manager.request_otp(&phone(n), Some(ADDRESS)).await, OtpOutcome::Sent);
    }
    assert_eq!(
        manager.request_otp(&phone(5), Some(ADDRESS)).await,
        OtpOutcome::RateLimitExceeded(RateLimitScope::Address)
    );

    // Rejected request does not touch the counter, code or lock
    assert_eq!(
        store.live_value(&keys::address_counter_key(ADDRESS)),
        Some(keys::encode_counter(5).to_vec())
    );
    assert!(store.live_value(&keys::active_code_key(&phone(5))).is_none());
    assert!(store.live_value(&keys::phone_lock_key(&phone(5))).is_none());

    // Other addresses are unaffected
    assert_eq!(manager.request_otp(&phone(5), Some("10.0.0.2")).await, OtpOutcome::Sent);
    assert_eq!(audit.count("otp_issued"), 6);
}

#[tokio::test]
async fn test_sequential_requests_are_audited_above_threshold() {
    let (manager, _store, audit) = manager();

    for n in 0..6 {
        manager.request_otp(&phone(n), Some(ADDRESS)).await;
    }

    // Counter values 3, 4 and 5 are above the threshold of 2
    let attempts: Vec<i32> = audit
        .events()
        .into_iter()
        .filter_map(|e| match e {
            AuditEvent::SequentialRequests { attempt, .. } => Some(attempt),
            _ => None,
        })
        .collect();
    assert_eq!(attempts, vec![4, 5, 6]);
}

#[tokio::test]
async fn test_address_limit_is_checked_before_phone_lock() {
    let (manager, _store, _audit) = manager();

    for n in 0..5 {
        manager.request_otp(&phone(n), Some(ADDRESS)).await;
    }
    assert_eq!(
        manager.request_otp(&phone(0), Some(ADDRESS)).await,
        OtpOutcome::RateLimitExceeded(RateLimitScope::Address)
    );
}

#[tokio::test]
async fn test_missing_address_uses_unknown_bucket() {
    let (manager, store, audit) = manager();

    assert_eq!(manager.request_otp(PHONE, None).await, OtpOutcome::Sent);
    assert!(store.live_value("rate:ip:unknown").is_some());
    assert_eq!(
        audit.events()[0],
        AuditEvent::RequestReceived {
            phone: PHONE.to_string(),
            address: "unknown".to_string(),
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_cooldown_lapses_and_unexpired_code_is_reused() {
    let (manager, _store, audit) = manager();

    assert_eq!(manager.request_otp(PHONE, Some(ADDRESS)).await, OtpOutcome::Sent);
    tokio::time::advance(Duration::from_secs(61)).await;
    assert_eq!(manager.request_otp(PHONE, Some(ADDRESS)).await, OtpOutcome::Sent);

    let issued: Vec<(String, bool)> = audit
        .events()
        .into_iter()
        .filter_map(|e| match e {
            AuditEvent::OtpIssued { code, reused, .. } => Some((code, reused)),
            _ => None,
        })
        .collect();
    assert_eq!(
        issued,
        vec![("482913".to_string(), false), ("482913".to_string(), true)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_fresh_code_after_expiry() {
    let (manager, _store, audit) = manager();

    manager.request_otp(PHONE, Some(ADDRESS)).await;
    tokio::time::advance(Duration::from_secs(301)).await;

    assert!(!manager.verify_otp(PHONE, "482913").await);

    assert_eq!(manager.request_otp(PHONE, Some(ADDRESS)).await, OtpOutcome::Sent);
    assert_eq!(audit.last_issued_code(PHONE), Some("550071".to_string()));
    assert!(manager.verify_otp(PHONE, "550071").await);
}

#[tokio::test(start_paused = true)]
async fn test_code_valid_until_ttl() {
    let (manager, _store, _audit) = manager();

    manager.request_otp(PHONE, Some(ADDRESS)).await;
    tokio::time::advance(Duration::from_secs(299)).await;
    assert!(manager.verify_otp(PHONE, "482913").await);
}

#[tokio::test(start_paused = true)]
async fn test_address_quota_resets_after_window() {
    let (manager, _store, _audit) = manager();

    for n in 0..5 {
        manager.request_otp(&phone(n), Some(ADDRESS)).await;
    }
    assert_eq!(
        manager.request_otp(&phone(5), Some(ADDRESS)).await,
        OtpOutcome::RateLimitExceeded(RateLimitScope::Address)
    );

    tokio::time::advance(Duration::from_secs(61)).await;
    assert_eq!(manager.request_otp(&phone(5), Some(ADDRESS)).await, OtpOutcome::Sent);
}

#[tokio::test]
async fn test_store_failure_on_request_is_transient() {
    let (manager, _store, audit) = manager_with(MockTtlStore::failing(), &["482913"]);

    assert_eq!(
        manager.request_otp(PHONE, Some(ADDRESS)).await,
        OtpOutcome::TransientFailure
    );
    assert_eq!(audit.count("store_failure"), 1);
    assert_eq!(audit.count("otp_issued"), 0);
}

#[tokio::test]
async fn test_failure_after_code_is_stored_is_still_transient() {
    let store = MockTtlStore::new();
    store.fail_on("set");
    let (manager, store, audit) = manager_with(store, &["482913"]);

    assert_eq!(
        manager.request_otp(PHONE, Some(ADDRESS)).await,
        OtpOutcome::TransientFailure
    );
    // The code write went through before the counter write failed
    assert!(store.live_value(&keys::active_code_key(PHONE)).is_some());
    assert_eq!(audit.last_issued_code(PHONE), None);
}

#[tokio::test]
async fn test_corrupt_counter_is_transient() {
    let store = MockTtlStore::new();
    store.insert_raw(&keys::address_counter_key(ADDRESS), b"5", None);
    let (manager, _store, audit) = manager_with(store, &["482913"]);

    assert_eq!(
        manager.request_otp(PHONE, Some(ADDRESS)).await,
        OtpOutcome::TransientFailure
    );
    match audit.events().last() {
        Some(AuditEvent::StoreFailure { message, .. }) => assert!(message.contains("rate:ip:")),
        other => panic!("Expected store failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_store_failure_on_verify_is_false() {
    let (manager, store, audit) = manager();
    manager.request_otp(PHONE, Some(ADDRESS)).await;

    store.set_should_fail(true);
    assert!(!manager.verify_otp(PHONE, "482913").await);
    assert_eq!(audit.count("store_failure"), 1);

    store.set_should_fail(false);
    assert!(manager.verify_otp(PHONE, "482913").await);
}

#[tokio::test]
async fn test_delete_failure_on_verify_is_false() {
    let (manager, store, _audit) = manager();
    manager.request_otp(PHONE, Some(ADDRESS)).await;

    store.fail_on("delete");
    assert!(!manager.verify_otp(PHONE, "482913").await);
}

#[tokio::test]
async fn test_read_or_create_reuses_existing_value() {
    let (manager, store, _audit) = manager();
    let ttl = Duration::from_secs(30);

    let (first, reused) = manager
        .read_or_create("otp:phone:test", ttl, || "111111".to_string())
        .await
        .unwrap();
    assert_eq!((first.as_str(), reused), ("111111", false));

    let (second, reused) = manager
        .read_or_create("otp:phone:test", ttl, || panic!("generator must not run"))
        .await
        .unwrap();
    assert_eq!((second.as_str(), reused), ("111111", true));
    assert_eq!(store.live_string("otp:phone:test"), Some("111111".to_string()));
}

#[tokio::test]
async fn test_custom_policy_is_applied() {
    let store = MockTtlStore::new();
    let audit = MockAuditSink::new();
    let manager = OtpLifecycleManager::new(
        Arc::new(store),
        Arc::new(ScriptedCodeGenerator::new(&["482913"])),
        Arc::new(audit),
        OtpPolicy {
            max_requests_per_address: 1,
            ..OtpPolicy::default()
        },
    );

    assert_eq!(manager.policy().max_requests_per_address, 1);
    assert_eq!(manager.request_otp(&phone(1), Some(ADDRESS)).await, OtpOutcome::Sent);
    assert_eq!(
        manager.request_otp(&phone(2), Some(ADDRESS)).await,
        OtpOutcome::RateLimitExceeded(RateLimitScope::Address)
    );
}
