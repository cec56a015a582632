//! Integration tests for the lifecycle manager through the public crate API

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use otp_core::{
        MockAuditSink, OsRngCodeGenerator, OtpLifecycleManager, OtpOutcome, OtpPolicy,
        RateLimitScope, SeededCodeGenerator, StoreError, TtlStore,
    };

    // Store without expiry that yields before every call, so concurrent
    // requests interleave at each round trip
    #[derive(Default)]
    struct YieldingStore {
        entries: RwLock<HashMap<String, Vec<u8>>>,
    }

    #[async_trait]
    impl TtlStore for YieldingStore {
        async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            tokio::task::yield_now().await;
            Ok(self.entries.read().await.get(key).cloned())
        }

        async fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
            match self.get(key).await? {
                Some(bytes) => String::from_utf8(bytes).map(Some).map_err(|e| {
                    StoreError::CorruptValue { key: key.to_string(), message: e.to_string() }
                }),
                None => Ok(None),
            }
        }

        async fn set(&self, key: &str, value: &[u8], _ttl: Option<Duration>) -> Result<(), StoreError> {
            tokio::task::yield_now().await;
            self.entries.write().await.insert(key.to_string(), value.to_vec());
            Ok(())
        }

        async fn set_string(
            &self,
            key: &str,
            value: &str,
            ttl: Option<Duration>,
        ) -> Result<(), StoreError> {
            self.set(key, value.as_bytes(), ttl).await
        }

        async fn delete(&self, key: &str) -> Result<(), StoreError> {
            tokio::task::yield_now().await;
            self.entries.write().await.remove(key);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_round_trip_with_os_rng() {
        let audit = Arc::new(MockAuditSink::new());
        let manager = OtpLifecycleManager::new(
            Arc::new(YieldingStore::default()),
            Arc::new(OsRngCodeGenerator),
            audit.clone(),
            OtpPolicy::default(),
        );

        assert_eq!(manager.request_otp("09123456789", Some("10.1.1.1")).await, OtpOutcome::Sent);
        let code = audit.last_issued_code("09123456789").expect("code should be audited");
        assert_eq!(code.len(), 6);

        assert!(manager.verify_otp("09123456789", &code).await);
        assert!(!manager.verify_otp("09123456789", &code).await);
    }

    #[tokio::test]
    async fn test_seeded_generator_makes_runs_reproducible() {
        let mut codes = Vec::new();
        for _ in 0..2 {
            let audit = Arc::new(MockAuditSink::new());
            let manager = OtpLifecycleManager::new(
                Arc::new(YieldingStore::default()),
                Arc::new(SeededCodeGenerator::new(7)),
                audit.clone(),
                OtpPolicy::default(),
            );
            manager.request_otp("09351234567", None).await;
            codes.push(audit.last_issued_code("09351234567"));
        }
        assert!(codes[0].is_some());
        assert_eq!(codes[0], codes[1]);
    }

    #[tokio::test]
    async fn test_concurrent_requests_can_over_admit_one_address() {
        let audit = Arc::new(MockAuditSink::new());
        let manager = Arc::new(OtpLifecycleManager::new(
            Arc::new(YieldingStore::default()),
            Arc::new(OsRngCodeGenerator),
            audit.clone(),
            OtpPolicy::default(),
        ));

        let handles: Vec<_> = (0..10)
            .map(|n| {
                let manager = Arc::clone(&manager);
                tokio::spawn(async move {
                    let phone = format!("0912111{:04}", n);
                    manager.request_otp(&phone, Some("172.16.0.1")).await
                })
            })
            .collect();

        let mut sent = 0;
        for handle in handles {
            if handle.await.unwrap() == OtpOutcome::Sent {
                sent += 1;
            }
        }

        // Every request read the counter before any increment landed
        assert!(sent > manager.policy().max_requests_per_address);

        // Sequential requests see the counter again
        let mut outcome = OtpOutcome::Sent;
        for n in 10..20 {
            outcome = manager.request_otp(&format!("0912111{:04}", n), Some("172.16.0.1")).await;
            if outcome != OtpOutcome::Sent {
                break;
            }
        }
        assert_eq!(outcome, OtpOutcome::RateLimitExceeded(RateLimitScope::Address));
    }
}
