//! Registry trait defining the store operations the session manager relies on.

use async_trait::async_trait;

use crate::errors::SessionError;

/// Key-value store holding one entry per outstanding session
///
/// Each call is expected to be atomic at the store. No cross-call atomicity
/// is assumed: a concurrent `del` may land between a caller's `exists` and
/// whatever it does next.
///
/// Implementations map their own failures to [`SessionError::Registry`].
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Write `value` under `key`, replacing any previous entry
    ///
    /// # Arguments
    /// * `key` - Full registry key (`<prefix><jti>`)
    /// * `value` - Opaque marker; only its presence matters
    /// * `ttl_seconds` - Store-enforced lifetime, `None` for an unbounded entry
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> Result<(), SessionError>;

    /// Whether a live entry exists under `key`
    async fn exists(&self, key: &str) -> Result<bool, SessionError>;

    /// Remove the entry under `key`
    ///
    /// # Returns
    /// * `Ok(true)` - An entry was removed
    /// * `Ok(false)` - Nothing was stored under `key`; not an error
    async fn del(&self, key: &str) -> Result<bool, SessionError>;

    /// Reset the lifetime of an existing entry
    ///
    /// Never creates an entry.
    ///
    /// # Returns
    /// * `Ok(true)` - The entry exists and its TTL was refreshed
    /// * `Ok(false)` - No entry under `key`
    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<bool, SessionError>;
}
