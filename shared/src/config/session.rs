//! Session registry configuration

use serde::{Deserialize, Serialize};

use crate::types::TimeSpan;

/// Default prefix prepended to every registry key
pub const DEFAULT_PREFIX: &str = "session:";

/// Settings captured once by the session manager at construction
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Prefix for registry keys (`<prefix><jti>`)
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Registry-only expiry applied when a call gives no explicit expiry
    #[serde(default)]
    pub expires_key_in: Option<TimeSpan>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            expires_key_in: None,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    ///
    /// Reads `SESSION_PREFIX` and `SESSION_EXPIRES_KEY_IN`. An empty prefix
    /// falls back to the default.
    pub fn from_env() -> Self {
        let prefix = std::env::var("SESSION_PREFIX")
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(default_prefix);
        let expires_key_in = std::env::var("SESSION_EXPIRES_KEY_IN")
            .ok()
            .and_then(|raw| TimeSpan::parse_lenient(&raw));

        Self {
            prefix,
            expires_key_in,
        }
    }

    /// Set the registry key prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the default registry-only expiry
    pub fn with_expires_key_in(mut self, span: impl Into<TimeSpan>) -> Self {
        self.expires_key_in = Some(span.into());
        self
    }

    /// Registry key for a token id
    pub fn make_key(&self, jti: &str) -> String {
        format!("{}{}", self.prefix, jti)
    }
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.prefix, "session:");
        assert!(config.expires_key_in.is_none());
        assert_eq!(config.make_key("abc"), "session:abc");
    }

    #[test]
    fn test_session_config_builders() {
        let config = SessionConfig::default()
            .with_prefix("auth:")
            .with_expires_key_in("30 minutes");

        assert_eq!(config.make_key("1"), "auth:1");
        assert_eq!(
            config.expires_key_in,
            Some(TimeSpan::Text("30 minutes".to_string()))
        );
    }

    #[test]
    fn test_session_config_deserialize_defaults() {
        let config: SessionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SessionConfig::default());

        let config: SessionConfig =
            serde_json::from_str(r#"{"prefix":"s:","expires_key_in":600}"#).unwrap();
        assert_eq!(config.prefix, "s:");
        assert_eq!(config.expires_key_in, Some(TimeSpan::Seconds(600)));
    }
}
