use async_trait::async_trait;

use crate::domain::{Claims, CompleteToken, Secret, SignOptions, VerifyOptions};
use crate::errors::SessionError;

/// Signs, verifies and decodes tokens
#[async_trait]
pub trait Signer: Send + Sync {
    /// Produce a signed token from `claims`
    ///
    /// Resolves option-driven claims (`iat`, `exp`, `nbf`, `jti`, ...) into
    /// the payload before signing.
    async fn sign(
        &self,
        claims: &Claims,
        secret: &Secret,
        options: &SignOptions,
    ) -> Result<String, SessionError>;

    /// Check signature and registered claims, returning the payload
    ///
    /// # Errors
    /// * `TokenExpired` - the embedded `exp` has passed
    /// * `NotBefore` - the embedded `nbf` is in the future
    /// * `JsonWebToken` - anything structurally wrong
    async fn verify(
        &self,
        token: &str,
        secret: &Secret,
        options: &VerifyOptions,
    ) -> Result<Claims, SessionError>;

    /// Read the payload without any verification; `None` for malformed input
    fn decode(&self, token: &str) -> Option<Claims>;

    /// Like [`Signer::decode`], but returns header, payload and signature
    fn decode_complete(&self, token: &str) -> Option<CompleteToken>;
}
