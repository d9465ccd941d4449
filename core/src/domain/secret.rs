//! Signing and verification credentials

use std::fmt;
use std::fs;
use std::path::Path;

use crate::errors::SessionError;

/// Opaque credential handed to the signer
///
/// HMAC secrets sign and verify with the same bytes. For asymmetric
/// algorithms pass the PEM private key when signing and the PEM public key
/// when verifying.
#[derive(Clone, PartialEq, Eq)]
pub enum Secret {
    Hmac(Vec<u8>),
    RsaPem(Vec<u8>),
    EcPem(Vec<u8>),
    EdPem(Vec<u8>),
}

impl Secret {
    pub fn hmac(secret: impl AsRef<[u8]>) -> Self {
        Secret::Hmac(secret.as_ref().to_vec())
    }

    /// Load an RSA key (private or public) from a PEM file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use jr_core::Secret;
    ///
    /// let signing = Secret::rsa_pem_file("keys/jwt_private_key.pem").unwrap();
    /// let verifying = Secret::rsa_pem_file("keys/jwt_public_key.pem").unwrap();
    /// ```
    pub fn rsa_pem_file(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        read_pem(path.as_ref()).map(Secret::RsaPem)
    }

    /// Load an EC key (private or public) from a PEM file
    pub fn ec_pem_file(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        read_pem(path.as_ref()).map(Secret::EcPem)
    }

    /// Load an Ed25519 key (private or public) from a PEM file
    pub fn ed_pem_file(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        read_pem(path.as_ref()).map(Secret::EdPem)
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Secret::Hmac(bytes)
            | Secret::RsaPem(bytes)
            | Secret::EcPem(bytes)
            | Secret::EdPem(bytes) => bytes,
        }
    }
}

fn read_pem(path: &Path) -> Result<Vec<u8>, SessionError> {
    fs::read(path).map_err(|e| {
        SessionError::internal(format!("Failed to read key {}: {}", path.display(), e))
    })
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Secret::Hmac(_) => "Hmac",
            Secret::RsaPem(_) => "RsaPem",
            Secret::EcPem(_) => "EcPem",
            Secret::EdPem(_) => "EdPem",
        };
        write!(f, "Secret::{}(<redacted>)", kind)
    }
}

impl From<&str> for Secret {
    fn from(secret: &str) -> Self {
        Secret::hmac(secret)
    }
}

impl From<String> for Secret {
    fn from(secret: String) -> Self {
        Secret::Hmac(secret.into_bytes())
    }
}

impl From<Vec<u8>> for Secret {
    fn from(secret: Vec<u8>) -> Self {
        Secret::Hmac(secret)
    }
}
