//! In-process TTL store
//!
//! Used for local development (`CACHE_TYPE=memory`) and tests. Deadlines are
//! measured on `tokio::time::Instant`, so a paused test clock drives expiry.
//! Expired entries are evicted when read, and writes sweep the whole map
//! at most once per `SWEEP_INTERVAL` so keys that are never read again do
//! not accumulate.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use otp_core::{StoreError, TtlStore};

/// Minimum time between two full sweeps triggered by writes
const SWEEP_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
struct Entry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(deadline) if deadline <= now)
    }
}

#[derive(Debug)]
struct Entries {
    map: HashMap<String, Entry>,
    next_sweep: Instant,
}

impl Entries {
    fn get(&self, key: &str) -> Option<&Entry> {
        self.map.get(key)
    }

    fn sweep(&mut self, now: Instant) -> usize {
        let before = self.map.len();
        self.map.retain(|_, entry| !entry.is_expired(now));
        self.next_sweep = now + SWEEP_INTERVAL;
        before - self.map.len()
    }
}

/// TTL store kept in a process-local map
///
/// Clones share the same map.
#[derive(Debug, Clone)]
pub struct InMemoryTtlStore {
    entries: Arc<RwLock<Entries>>,
}

impl Default for InMemoryTtlStore {
    fn default() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Entries {
                map: HashMap::new(),
                next_sweep: Instant::now() + SWEEP_INTERVAL,
            })),
        }
    }
}

impl InMemoryTtlStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .map
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every expired entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        self.entries.write().await.sweep(Instant::now())
    }

    /// Entries physically held, expired or not
    pub(crate) async fn stored_entries(&self) -> usize {
        self.entries.read().await.map.len()
    }

    /// Remaining lifetime of a key; `None` when absent or without expiry
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        let entry = entries.get(key).filter(|entry| !entry.is_expired(now))?;
        entry.expires_at.map(|deadline| deadline - now)
    }

    async fn read_live(&self, key: &str) -> Option<Vec<u8>> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        // Expired: evict unless a writer replaced it in the meantime
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.map.remove(key);
        }
        None
    }

    async fn write(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) {
        let now = Instant::now();
        let entry = Entry {
            value,
            expires_at: ttl.map(|ttl| now + ttl),
        };

        let mut entries = self.entries.write().await;
        if now >= entries.next_sweep {
            entries.sweep(now);
        }
        entries.map.insert(key.to_string(), entry);
    }
}

#[async_trait]
impl TtlStore for InMemoryTtlStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.read_live(key).await)
    }

    async fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.read_live(key).await {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| StoreError::CorruptValue {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<(), StoreError> {
        self.write(key, value.to_vec(), ttl).await;
        Ok(())
    }

    async fn set_string(
        &self,
        key: &str,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), StoreError> {
        self.write(key, value.as_bytes().to_vec(), ttl).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.map.remove(key);
        Ok(())
    }
}
