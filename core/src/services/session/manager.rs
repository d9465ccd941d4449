//! Main session token manager implementation

use chrono::{TimeZone, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use jr_shared::config::SessionConfig;

use crate::domain::{Claims, CompleteToken, Secret, SignOptions, TimeSpan, VerifyOptions};
use crate::errors::SessionError;
use crate::repositories::SessionRegistry;
use crate::services::duration::{resolve_seconds, DurationParser, HumantimeParser};
use crate::services::id::{IdGenerator, UuidGenerator};
use crate::services::signer::{JwtSigner, Signer};

/// Value stored under every registry key; only presence matters
pub const ENTRY_MARKER: &str = "true";

/// Issues and checks revocable session tokens
///
/// Every token carries a `jti` and is mirrored by a registry entry under
/// `<prefix><jti>`. The entry's lifetime is chosen at sign time:
/// - `exp` present: TTL = `exp - now`, the entry dies with the token
/// - otherwise `expk` present: TTL = `expk`, the registry alone expires it
/// - neither: no TTL, the entry lives until destroyed
///
/// A token is valid only while its signature checks out and its entry exists.
pub struct SessionTokenManager<R: SessionRegistry, S: Signer = JwtSigner> {
    registry: R,
    signer: S,
    ids: Arc<dyn IdGenerator>,
    durations: Arc<dyn DurationParser>,
    config: SessionConfig,
}

impl<R: SessionRegistry> SessionTokenManager<R, JwtSigner> {
    /// Creates a manager with the default signer, id generator and duration parser
    ///
    /// # Example
    ///
    /// ```
    /// use jr_core::{InMemoryRegistry, SessionTokenManager};
    /// use jr_shared::SessionConfig;
    ///
    /// let manager = SessionTokenManager::with_defaults(
    ///     InMemoryRegistry::new(),
    ///     SessionConfig::default().with_expires_key_in("30 minutes"),
    /// );
    /// assert_eq!(manager.key_for("abc"), "session:abc");
    /// ```
    pub fn with_defaults(registry: R, config: SessionConfig) -> Self {
        Self::new(registry, JwtSigner::new(), config)
    }
}

impl<R: SessionRegistry, S: Signer> SessionTokenManager<R, S> {
    /// Creates a new session manager
    ///
    /// # Arguments
    ///
    /// * `registry` - Store tracking live sessions
    /// * `signer` - Token signing capability
    /// * `config` - Key prefix and default registry expiry, fixed for the manager's lifetime
    pub fn new(registry: R, signer: S, config: SessionConfig) -> Self {
        Self {
            registry,
            signer,
            ids: Arc::new(UuidGenerator),
            durations: Arc::new(HumantimeParser),
            config,
        }
    }

    /// Replaces the session id generator
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Replaces the parser used for textual `expires_key_in` values
    pub fn with_duration_parser(mut self, durations: Arc<dyn DurationParser>) -> Self {
        self.durations = durations;
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn signer(&self) -> &S {
        &self.signer
    }

    /// Registry key for a session id
    pub fn key_for(&self, jti: &str) -> String {
        self.config.make_key(jti)
    }

    /// Signs a session token and records it in the registry
    ///
    /// `payload` and `options` are copied, never mutated. The signature-level
    /// expiry (`options.expires_in`, else `payload.exp`) takes precedence: a
    /// registry-only `expk` is computed only when neither is present.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The signed token, with its registry entry written
    /// * `Err(SessionError)` - Signing or the registry write failed; no token is handed out
    pub async fn sign(
        &self,
        payload: &Claims,
        secret: &Secret,
        options: &SignOptions,
    ) -> Result<String, SessionError> {
        let mut payload = payload.clone();
        let mut options = options.clone();

        let has_hard_expiry = options.expires_in.is_some() || payload.exp().is_some();
        let expires_key_in = options
            .expires_key_in
            .take()
            .or_else(|| self.config.expires_key_in.clone());
        if !has_hard_expiry {
            if let Some(span) = expires_key_in {
                payload.set_expk(self.registry_seconds(&span)?);
            }
        }

        if options.jwtid.is_none() && payload.jti().is_none() {
            options.jwtid = Some(self.ids.new_id());
        }

        let token = self.signer.sign(&payload, secret, &options).await?;

        // Read back what the signer resolved; it may differ from the inputs.
        let issued = self
            .signer
            .decode(&token)
            .ok_or_else(|| SessionError::internal("Signer produced a token it cannot decode"))?;
        let jti = issued
            .jti()
            .ok_or_else(|| SessionError::internal("Signed token carries no jti"))?;

        let ttl = self.entry_ttl(&issued)?;
        self.registry
            .set(&self.key_for(jti), ENTRY_MARKER, ttl)
            .await?;

        info!("Issued session {} (registry ttl: {:?})", jti, ttl);
        Ok(token)
    }

    /// Verifies a session token against the registry and its signature
    ///
    /// The registry is consulted first: a missing entry means the session was
    /// revoked or has lapsed, and the signature is not even checked. When the
    /// signer reports an expired `exp`, the stale entry is cleaned up before
    /// the error is returned. A decodable token without a `jti` is rejected
    /// as revoked rather than falling through to the signature check.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Verified claims
    /// * `Err(SessionError::TokenExpired)` - Revoked, lapsed or expired
    /// * `Err(SessionError::NotBefore)` / `Err(SessionError::JsonWebToken)` - From the signer, registry untouched
    pub async fn verify(
        &self,
        token: &str,
        secret: &Secret,
        options: &VerifyOptions,
    ) -> Result<Claims, SessionError> {
        let jti = match self.signer.decode(token) {
            Some(claims) => match claims.jti() {
                Some(jti) => Some(jti.to_string()),
                None => {
                    debug!("Rejecting token without jti");
                    return Err(SessionError::revoked());
                }
            },
            // Undecodable: let the signer explain what is wrong with it.
            None => None,
        };

        if let Some(jti) = &jti {
            if !self.registry.exists(&self.key_for(jti)).await? {
                debug!("Session {} has no registry entry", jti);
                return Err(SessionError::revoked());
            }
        }

        match self.signer.verify(token, secret, options).await {
            Ok(claims) => Ok(claims),
            Err(err @ SessionError::TokenExpired { .. }) => {
                if let Some(jti) = &jti {
                    if let Err(cleanup) = self.destroy_by_jti(jti).await {
                        warn!("Failed to clean up expired session {}: {}", jti, cleanup);
                    }
                }
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Decodes a token without verifying anything; `None` if malformed
    pub fn decode(&self, token: &str) -> Option<Claims> {
        self.signer.decode(token)
    }

    /// Decodes a token into header, payload and signature without verifying
    pub fn decode_complete(&self, token: &str) -> Option<CompleteToken> {
        self.signer.decode_complete(token)
    }

    /// Whether the token's registry entry exists; the signature is not checked
    pub async fn is_live(&self, token: &str) -> Result<bool, SessionError> {
        match self.decode(token).as_ref().and_then(Claims::jti) {
            Some(jti) => self.registry.exists(&self.key_for(jti)).await,
            None => Ok(false),
        }
    }

    /// Slides the registry expiry of an `expk`-governed token
    ///
    /// Tokens with an `exp` are left alone since their lifetime is fixed by the
    /// signature, and unbounded tokens have nothing to refresh. A missing entry
    /// is never recreated.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The entry's TTL was reset to `expk`
    /// * `Ok(false)` - Nothing to refresh
    pub async fn touch(&self, token: &str) -> Result<bool, SessionError> {
        let Some(claims) = self.decode(token) else {
            return Ok(false);
        };

        match (claims.jti(), claims.expk(), claims.exp()) {
            (Some(jti), Some(expk), None) if expk > 0 => {
                let refreshed = self
                    .registry
                    .expire(&self.key_for(jti), expk as u64)
                    .await?;
                if refreshed {
                    debug!("Refreshed session {} for {}s", jti, expk);
                } else {
                    debug!("Session {} is gone, nothing to refresh", jti);
                }
                Ok(refreshed)
            }
            _ => Ok(false),
        }
    }

    /// Revokes a token by deleting its registry entry
    ///
    /// Idempotent; malformed tokens and unknown sessions are no-ops.
    pub async fn destroy(&self, token: &str) -> Result<(), SessionError> {
        match self.decode(token).as_ref().and_then(Claims::jti) {
            Some(jti) => self.destroy_by_jti(jti).await,
            None => Ok(()),
        }
    }

    /// Revokes a session by id
    pub async fn destroy_by_jti(&self, jti: &str) -> Result<(), SessionError> {
        if jti.is_empty() {
            return Ok(());
        }
        let removed = self.registry.del(&self.key_for(jti)).await?;
        if removed {
            info!("Destroyed session {}", jti);
        }
        Ok(())
    }

    /// Registry TTL for a freshly issued token
    fn entry_ttl(&self, issued: &Claims) -> Result<Option<u64>, SessionError> {
        if let Some(exp) = issued.exp() {
            let remaining = exp
                .checked_sub(Utc::now().timestamp())
                .ok_or_else(|| SessionError::InvalidDuration {
                    value: exp.to_string(),
                })?;
            if remaining <= 0 {
                return Err(SessionError::TokenExpired {
                    expired_at: Utc.timestamp_opt(exp, 0).single(),
                });
            }
            return Ok(Some(remaining as u64));
        }

        match issued.expk() {
            Some(expk) if expk > 0 => Ok(Some(expk as u64)),
            Some(expk) => Err(SessionError::InvalidDuration {
                value: expk.to_string(),
            }),
            None => Ok(None),
        }
    }

    fn registry_seconds(&self, span: &TimeSpan) -> Result<i64, SessionError> {
        let seconds = resolve_seconds(self.durations.as_ref(), span)?;
        if seconds <= 0 {
            return Err(SessionError::InvalidDuration {
                value: span.to_string(),
            });
        }
        Ok(seconds)
    }
}
