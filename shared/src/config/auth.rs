//! JWT signing configuration

use serde::{Deserialize, Serialize};

const DEVELOPMENT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared secret for HMAC algorithms
    pub secret: String,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// PEM private key path for asymmetric algorithms
    #[serde(default)]
    pub private_key_path: Option<String>,

    /// PEM public key path for asymmetric algorithms
    #[serde(default)]
    pub public_key_path: Option<String>,

    /// Issuer claim added to signed tokens
    #[serde(default)]
    pub issuer: Option<String>,

    /// Audience claim added to signed tokens
    #[serde(default)]
    pub audience: Option<String>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEVELOPMENT_SECRET),
            algorithm: default_algorithm(),
            private_key_path: None,
            public_key_path: None,
            issuer: None,
            audience: None,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEVELOPMENT_SECRET.to_string());
        let algorithm = std::env::var("JWT_ALGORITHM").unwrap_or_else(|_| default_algorithm());

        Self {
            secret,
            algorithm,
            private_key_path: std::env::var("JWT_PRIVATE_KEY_PATH").ok(),
            public_key_path: std::env::var("JWT_PUBLIC_KEY_PATH").ok(),
            issuer: std::env::var("JWT_ISSUER").ok(),
            audience: std::env::var("JWT_AUDIENCE").ok(),
        }
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }

    /// Whether the algorithm is HMAC based
    pub fn is_symmetric(&self) -> bool {
        self.algorithm.to_ascii_uppercase().starts_with("HS")
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert!(config.is_using_default_secret());
        assert!(config.is_symmetric());
        assert_eq!(config.algorithm, "HS256");
    }

    #[test]
    fn test_jwt_config_new() {
        let config = JwtConfig::new("shhhhhh");
        assert!(!config.is_using_default_secret());
        assert_eq!(config.secret, "shhhhhh");
    }

    #[test]
    fn test_asymmetric_algorithm() {
        let config = JwtConfig {
            algorithm: "RS256".to_string(),
            ..Default::default()
        };
        assert!(!config.is_symmetric());
    }
}
