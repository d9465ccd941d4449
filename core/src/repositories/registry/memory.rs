//! In-process registry with store-native TTL semantics
//!
//! Deadlines use `tokio::time::Instant`, so tests running with a paused
//! clock can advance time deterministically.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::errors::SessionError;

use super::traits::SessionRegistry;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    deadline: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.deadline.map_or(true, |deadline| deadline > now)
    }
}

/// Registry kept in process memory
///
/// Cloning shares the underlying map. Expired entries are treated as absent
/// and dropped lazily on access.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value of a live entry
    pub async fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone())
    }

    /// Remaining lifetime in whole seconds (rounded up)
    ///
    /// `None` if the key does not exist or has no expiry.
    pub async fn ttl(&self, key: &str) -> Option<u64> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        let entry = entries.get(key).filter(|entry| entry.is_live(now))?;
        let remaining = entry.deadline?.saturating_duration_since(now);
        Some(remaining.as_millis().div_ceil(1000) as u64)
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.read().await;
        entries.values().filter(|entry| entry.is_live(now)).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn deadline(ttl_seconds: u64) -> Result<Instant, SessionError> {
        Instant::now()
            .checked_add(Duration::from_secs(ttl_seconds))
            .ok_or_else(|| SessionError::registry(format!("expire time out of range: {}", ttl_seconds)))
    }
}

#[async_trait]
impl SessionRegistry for InMemoryRegistry {
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> Result<(), SessionError> {
        // Redis rejects `SET ... EX 0`; keep the same contract.
        if ttl_seconds == Some(0) {
            return Err(SessionError::registry("invalid expire time in 'set' command"));
        }

        let entry = Entry {
            value: value.to_string(),
            deadline: ttl_seconds.map(Self::deadline).transpose()?,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        debug!("Stored registry key '{}' with ttl {:?}", key, ttl_seconds);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, SessionError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(true),
            Some(_) => {
                entries.remove(key);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn del(&self, key: &str) -> Result<bool, SessionError> {
        let now = Instant::now();
        let removed = self.entries.write().await.remove(key);
        Ok(removed.is_some_and(|entry| entry.is_live(now)))
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<bool, SessionError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        match entries.get_mut(key) {
            Some(entry) if entry.is_live(now) => {
                // A zero TTL deletes the key, as it does in Redis.
                if ttl_seconds == 0 {
                    entries.remove(key);
                } else {
                    entry.deadline = Some(Self::deadline(ttl_seconds)?);
                }
                Ok(true)
            }
            Some(_) => {
                entries.remove(key);
                Ok(false)
            }
            None => Ok(false),
        }
    }
}
