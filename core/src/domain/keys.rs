//! Key material resolved from `JwtConfig`

use jsonwebtoken::Algorithm;
use std::path::PathBuf;
use std::str::FromStr;

use jr_shared::config::JwtConfig;

use crate::domain::{Secret, SignOptions, VerifyOptions};
use crate::errors::SessionError;

/// Signing and verification secrets for one configured algorithm
///
/// HMAC algorithms use `JwtConfig::secret` for both directions. Asymmetric
/// algorithms load the PEM private key for signing and the PEM public key
/// for verifying.
#[derive(Debug, Clone)]
pub struct SigningKeys {
    algorithm: Algorithm,
    signing: Secret,
    verifying: Secret,
    issuer: Option<String>,
    audience: Option<String>,
    key_paths: Option<(PathBuf, PathBuf)>,
}

impl SigningKeys {
    /// Resolves the configured algorithm and loads its keys
    ///
    /// # Returns
    ///
    /// * `Ok(SigningKeys)` - Keys ready for use
    /// * `Err(SessionError::Internal)` - Unknown algorithm, missing key path or unreadable key file
    pub fn from_config(config: &JwtConfig) -> Result<Self, SessionError> {
        let algorithm = parse_algorithm(&config.algorithm)?;

        let (signing, verifying, key_paths) = match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
                let secret = Secret::hmac(config.secret.as_bytes());
                (secret.clone(), secret, None)
            }
            _ => {
                let private = required_path(config.private_key_path.as_deref(), "private_key_path", &config.algorithm)?;
                let public = required_path(config.public_key_path.as_deref(), "public_key_path", &config.algorithm)?;
                let (signing, verifying) = match algorithm {
                    Algorithm::ES256 | Algorithm::ES384 => {
                        (Secret::ec_pem_file(&private)?, Secret::ec_pem_file(&public)?)
                    }
                    Algorithm::EdDSA => (Secret::ed_pem_file(&private)?, Secret::ed_pem_file(&public)?),
                    _ => (Secret::rsa_pem_file(&private)?, Secret::rsa_pem_file(&public)?),
                };
                (signing, verifying, Some((private, public)))
            }
        };

        Ok(Self {
            algorithm,
            signing,
            verifying,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            key_paths,
        })
    }

    /// Reloads PEM keys from disk; HMAC keys are left as they are
    pub fn reload(&mut self) -> Result<(), SessionError> {
        let Some((private, public)) = &self.key_paths else {
            return Ok(());
        };
        let (signing, verifying) = match self.signing {
            Secret::EcPem(_) => (Secret::ec_pem_file(private)?, Secret::ec_pem_file(public)?),
            Secret::EdPem(_) => (Secret::ed_pem_file(private)?, Secret::ed_pem_file(public)?),
            _ => (Secret::rsa_pem_file(private)?, Secret::rsa_pem_file(public)?),
        };
        self.signing = signing;
        self.verifying = verifying;
        Ok(())
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn signing(&self) -> &Secret {
        &self.signing
    }

    pub fn verifying(&self) -> &Secret {
        &self.verifying
    }

    /// Sign options pinned to the configured algorithm, issuer and audience
    pub fn sign_options(&self) -> SignOptions {
        let mut options = SignOptions::new().with_algorithm(self.algorithm);
        if let Some(issuer) = &self.issuer {
            options = options.with_issuer(issuer.as_str());
        }
        if let Some(audience) = &self.audience {
            options = options.with_audience(audience.as_str());
        }
        options
    }

    /// Verify options accepting only the configured algorithm, issuer and audience
    pub fn verify_options(&self) -> VerifyOptions {
        let mut options = VerifyOptions::new().with_algorithms(&[self.algorithm]);
        if let Some(issuer) = &self.issuer {
            options = options.with_issuer(issuer.as_str());
        }
        if let Some(audience) = &self.audience {
            options = options.with_audience(audience.as_str());
        }
        options
    }
}

fn parse_algorithm(name: &str) -> Result<Algorithm, SessionError> {
    if name.eq_ignore_ascii_case("eddsa") {
        return Ok(Algorithm::EdDSA);
    }
    Algorithm::from_str(&name.to_ascii_uppercase())
        .map_err(|_| SessionError::internal(format!("Unsupported JWT algorithm: {}", name)))
}

fn required_path(path: Option<&str>, field: &str, algorithm: &str) -> Result<PathBuf, SessionError> {
    path.filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| SessionError::internal(format!("jwt.{} is required for {}", field, algorithm)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SessionErrorKind;

    #[test]
    fn test_hmac_keys_from_config() {
        let keys = SigningKeys::from_config(&JwtConfig::new("shhhhhh")).unwrap();

        assert_eq!(keys.algorithm(), Algorithm::HS256);
        assert_eq!(keys.signing(), &Secret::from("shhhhhh"));
        assert_eq!(keys.signing(), keys.verifying());
    }

    #[test]
    fn test_algorithm_names_are_case_insensitive() {
        assert_eq!(parse_algorithm("hs512").unwrap(), Algorithm::HS512);
        assert_eq!(parse_algorithm("EdDSA").unwrap(), Algorithm::EdDSA);
        assert_eq!(parse_algorithm("ps256").unwrap(), Algorithm::PS256);
    }

    #[test]
    fn test_unknown_algorithm() {
        let config = JwtConfig {
            algorithm: "none".to_string(),
            ..JwtConfig::default()
        };
        let err = SigningKeys::from_config(&config).unwrap_err();
        assert_eq!(err.kind(), SessionErrorKind::Internal);
    }

    #[test]
    fn test_asymmetric_algorithm_requires_key_paths() {
        let config = JwtConfig {
            algorithm: "RS256".to_string(),
            ..JwtConfig::default()
        };
        let err = SigningKeys::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("private_key_path"));

        let config = JwtConfig {
            algorithm: "RS256".to_string(),
            private_key_path: Some("/nonexistent/private.pem".to_string()),
            public_key_path: Some("/nonexistent/public.pem".to_string()),
            ..JwtConfig::default()
        };
        let err = SigningKeys::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("Failed to read key"));
    }

    #[test]
    fn test_options_carry_issuer_and_audience() {
        let config = JwtConfig {
            issuer: Some("auth".to_string()),
            audience: Some("api".to_string()),
            ..JwtConfig::new("shhhhhh")
        };
        let keys = SigningKeys::from_config(&config).unwrap();

        let sign = keys.sign_options();
        assert_eq!(sign.algorithm, Some(Algorithm::HS256));
        assert_eq!(sign.issuer.as_deref(), Some("auth"));
        assert_eq!(sign.audience.as_deref(), Some("api"));

        let verify = keys.verify_options();
        assert_eq!(verify.algorithms, vec![Algorithm::HS256]);
        assert_eq!(verify.issuer, vec!["auth".to_string()]);
        assert_eq!(verify.audience, vec!["api".to_string()]);
    }

    #[test]
    fn test_reload_is_noop_for_hmac() {
        let mut keys = SigningKeys::from_config(&JwtConfig::new("shhhhhh")).unwrap();
        keys.reload().unwrap();
        assert_eq!(keys.verifying(), &Secret::from("shhhhhh"));
    }
}
