//! Options accepted by sign and verify.

use jsonwebtoken::Algorithm;
use jr_shared::TimeSpan;
use serde_json::{Map, Value};

/// Options for signing a session token
///
/// `expires_key_in` belongs to the session manager and is stripped before
/// the options reach the signer. Anything signer-specific that has no typed
/// field goes into `extra` and is passed through unchanged.
#[derive(Debug, Clone, Default)]
pub struct SignOptions {
    /// Signing algorithm; the signer picks one matching the secret when unset
    pub algorithm: Option<Algorithm>,
    /// Signature-enforced lifetime, resolved to `exp`
    pub expires_in: Option<TimeSpan>,
    /// Registry-only lifetime, resolved to `expk` when no `exp` applies
    pub expires_key_in: Option<TimeSpan>,
    /// Delay before the token becomes valid, resolved to `nbf`
    pub not_before: Option<TimeSpan>,
    /// Resolved to `jti`
    pub jwtid: Option<String>,
    /// Resolved to `aud`
    pub audience: Option<String>,
    /// Resolved to `iss`
    pub issuer: Option<String>,
    /// Resolved to `sub`
    pub subject: Option<String>,
    /// `kid` header
    pub key_id: Option<String>,
    /// Skip the `iat` claim
    pub no_timestamp: bool,
    /// Signer-specific pass-through options
    pub extra: Map<String, Value>,
}

impl SignOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn with_expires_in(mut self, span: impl Into<TimeSpan>) -> Self {
        self.expires_in = Some(span.into());
        self
    }

    pub fn with_expires_key_in(mut self, span: impl Into<TimeSpan>) -> Self {
        self.expires_key_in = Some(span.into());
        self
    }

    pub fn with_not_before(mut self, span: impl Into<TimeSpan>) -> Self {
        self.not_before = Some(span.into());
        self
    }

    pub fn with_jwtid(mut self, jwtid: impl Into<String>) -> Self {
        self.jwtid = Some(jwtid.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    pub fn without_timestamp(mut self) -> Self {
        self.no_timestamp = true;
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Options for verifying a session token
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    /// Accepted algorithms; empty means every algorithm of the secret's family
    pub algorithms: Vec<Algorithm>,
    /// Accepted `aud` values; empty skips the audience check
    pub audience: Vec<String>,
    /// Accepted `iss` values; empty skips the issuer check
    pub issuer: Vec<String>,
    /// Required `sub`
    pub subject: Option<String>,
    /// Required `jti`
    pub jwtid: Option<String>,
    pub ignore_expiration: bool,
    pub ignore_not_before: bool,
    /// Leeway in seconds for `exp` and `nbf`
    pub clock_tolerance: u64,
}

impl VerifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithms(mut self, algorithms: &[Algorithm]) -> Self {
        self.algorithms = algorithms.to_vec();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience.push(audience.into());
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer.push(issuer.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_jwtid(mut self, jwtid: impl Into<String>) -> Self {
        self.jwtid = Some(jwtid.into());
        self
    }

    pub fn ignoring_expiration(mut self) -> Self {
        self.ignore_expiration = true;
        self
    }

    pub fn ignoring_not_before(mut self) -> Self {
        self.ignore_not_before = true;
        self
    }

    pub fn with_clock_tolerance(mut self, seconds: u64) -> Self {
        self.clock_tolerance = seconds;
        self
    }
}
