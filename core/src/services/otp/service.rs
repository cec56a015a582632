//! OTP lifecycle manager implementation

use constant_time_eq::constant_time_eq;
use std::sync::Arc;
use std::time::Duration;

use otp_shared::phone::{is_valid_mobile, mask_phone_number};

use crate::domain::keys::{self, PHONE_LOCK_SENTINEL};
use crate::domain::{OtpOutcome, RateLimitScope};
use crate::errors::{DomainError, DomainResult, StoreError};
use crate::services::audit::{AuditEvent, AuditSink};
use crate::services::store::TtlStore;

use super::config::OtpPolicy;
use super::generator::CodeGenerator;

/// Issues and verifies one-time passcodes over a shared TTL store
///
/// The manager holds no mutable state of its own; every counter, lock and
/// code lives in the store, so any number of managers may share one store.
pub struct OtpLifecycleManager<S: TtlStore, G: CodeGenerator, A: AuditSink> {
    /// Store holding counters, locks and active codes
    store: Arc<S>,
    /// Random source for fresh codes
    generator: Arc<G>,
    /// Receiver of lifecycle events
    audit: Arc<A>,
    policy: OtpPolicy,
}

impl<S: TtlStore, G: CodeGenerator, A: AuditSink> OtpLifecycleManager<S, G, A> {
    /// Create a new lifecycle manager
    ///
    /// # Arguments
    ///
    /// * `store` - TTL store implementation
    /// * `generator` - Random source for fresh codes
    /// * `audit` - Audit sink receiving lifecycle events
    /// * `policy` - Limits and lifetimes
    pub fn new(store: Arc<S>, generator: Arc<G>, audit: Arc<A>, policy: OtpPolicy) -> Self {
        Self {
            store,
            generator,
            audit,
            policy,
        }
    }

    pub fn policy(&self) -> &OtpPolicy {
        &self.policy
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Request a code for a phone number
    ///
    /// Checks, in order: phone format, the per-address quota and the
    /// per-phone cooldown. When all pass, an unexpired code is reused or a
    /// fresh one is stored, the address counter is incremented, the phone is
    /// locked for the cooldown, and the code is handed to the audit sink.
    ///
    /// Store failures are audited and reported as `TransientFailure`.
    #[tracing::instrument(
        name = "request_otp",
        skip_all,
        fields(phone = %mask_phone_number(phone_number))
    )]
    pub async fn request_otp(
        &self,
        phone_number: &str,
        source_address: Option<&str>,
    ) -> OtpOutcome {
        let address = keys::address_bucket(source_address);
        self.audit.record(&AuditEvent::RequestReceived {
            phone: phone_number.to_string(),
            address: address.to_string(),
        });

        match self.try_request(phone_number, address).await {
            Ok(()) => OtpOutcome::Sent,
            Err(DomainError::Validation { .. }) => OtpOutcome::InvalidPhoneNumber,
            Err(DomainError::RateLimitExceeded { scope }) => OtpOutcome::RateLimitExceeded(scope),
            Err(err) => {
                self.audit.record(&AuditEvent::StoreFailure {
                    operation: "request_otp",
                    phone: phone_number.to_string(),
                    message: err.to_string(),
                });
                OtpOutcome::TransientFailure
            }
        }
    }

    /// Verify a submitted code, consuming it on an exact match
    ///
    /// Absent, expired and mismatched codes all yield `false`, as does any
    /// store failure. There is no attempt counter.
    #[tracing::instrument(
        name = "verify_otp",
        skip_all,
        fields(phone = %mask_phone_number(phone_number))
    )]
    pub async fn verify_otp(&self, phone_number: &str, submitted_code: &str) -> bool {
        match self.try_verify(phone_number, submitted_code).await {
            Ok(verified) => verified,
            Err(err) => {
                self.audit.record(&AuditEvent::StoreFailure {
                    operation: "verify_otp",
                    phone: phone_number.to_string(),
                    message: err.to_string(),
                });
                false
            }
        }
    }

    /// Return the value at `key`, or store `generate()` there with `ttl`
    ///
    /// The flag is `true` when an existing value was returned.
    pub async fn read_or_create<F>(
        &self,
        key: &str,
        ttl: Duration,
        generate: F,
    ) -> Result<(String, bool), StoreError>
    where
        F: FnOnce() -> String + Send,
    {
        if let Some(existing) = self.store.get_string(key).await? {
            return Ok((existing, true));
        }

        let value = generate();
        self.store.set_string(key, &value, Some(ttl)).await?;
        Ok((value, false))
    }

    async fn try_request(&self, phone: &str, address: &str) -> DomainResult<()> {
        if !is_valid_mobile(phone) {
            self.audit.record(&AuditEvent::InvalidPhoneNumber {
                phone: phone.to_string(),
                address: address.to_string(),
            });
            return Err(DomainError::Validation {
                message: "phone number must be 11 digits starting with 09".to_string(),
            });
        }

        let counter_key = keys::address_counter_key(address);
        let count = self.read_counter(&counter_key).await?;

        if count > self.policy.sequential_warning_threshold {
            self.audit.record(&AuditEvent::SequentialRequests {
                address: address.to_string(),
                attempt: count.saturating_add(1),
            });
        }

        if count >= self.policy.max_requests_per_address {
            return Err(self.rate_limited(RateLimitScope::Address, phone, address, count));
        }

        let lock_key = keys::phone_lock_key(phone);
        if self.store.exists(&lock_key).await? {
            return Err(self.rate_limited(RateLimitScope::Phone, phone, address, count));
        }

        let code_key = keys::active_code_key(phone);
        let generator = Arc::clone(&self.generator);
        let (code, reused) = self
            .read_or_create(&code_key, self.policy.code_ttl, move || generator.generate())
            .await?;

        // Read-check-write on the counter is not atomic; concurrent requests
        // from one address can be over-admitted within a window.
        self.store
            .set(
                &counter_key,
                &keys::encode_counter(count.saturating_add(1)),
                Some(self.policy.address_window),
            )
            .await?;
        self.store
            .set_string(&lock_key, PHONE_LOCK_SENTINEL, Some(self.policy.phone_cooldown))
            .await?;

        self.audit.record(&AuditEvent::OtpIssued {
            phone: phone.to_string(),
            code,
            reused,
        });
        Ok(())
    }

    async fn try_verify(&self, phone: &str, submitted_code: &str) -> Result<bool, StoreError> {
        let code_key = keys::active_code_key(phone);

        match self.store.get_string(&code_key).await? {
            Some(stored) if constant_time_eq(stored.as_bytes(), submitted_code.as_bytes()) => {
                self.store.delete(&code_key).await?;
                self.audit.record(&AuditEvent::OtpVerified {
                    phone: phone.to_string(),
                });
                Ok(true)
            }
            _ => {
                self.audit.record(&AuditEvent::OtpVerificationFailed {
                    phone: phone.to_string(),
                    submitted_code: submitted_code.to_string(),
                });
                Ok(false)
            }
        }
    }

    async fn read_counter(&self, key: &str) -> Result<i32, StoreError> {
        match self.store.get(key).await? {
            Some(bytes) => keys::decode_counter(key, &bytes),
            None => Ok(0),
        }
    }

    fn rate_limited(
        &self,
        scope: RateLimitScope,
        phone: &str,
        address: &str,
        count: i32,
    ) -> DomainError {
        self.audit.record(&AuditEvent::RateLimited {
            scope,
            phone: phone.to_string(),
            address: address.to_string(),
            count,
        });
        DomainError::RateLimitExceeded { scope }
    }
}
