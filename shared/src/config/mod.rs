//! Configuration module
//!
//! - `auth` - JWT signing configuration
//! - `cache` - Redis registry connection
//! - `environment` - Environment detection and logging configuration
//! - `session` - Registry key prefix and default registry expiry

pub mod auth;
pub mod cache;
pub mod environment;
pub mod session;

use serde::{Deserialize, Serialize};

pub use auth::JwtConfig;
pub use cache::CacheConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use session::SessionConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Session registry configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// JWT signing configuration
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Redis configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            session: SessionConfig::default(),
            jwt: JwtConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let mut logging = LoggingConfig::for_environment(environment);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            logging.level = level;
        }

        Self {
            environment,
            session: SessionConfig::from_env(),
            jwt: JwtConfig::from_env(),
            cache: CacheConfig::from_env(),
            logging,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.session.prefix, "session:");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_app_config_partial_deserialize() {
        let config: AppConfig =
            serde_json::from_str(r#"{"session":{"expires_key_in":"1 day"}}"#).unwrap();
        assert_eq!(config.session.prefix, "session:");
        assert!(config.session.expires_key_in.is_some());
        assert_eq!(config.cache.url, "redis://localhost:6379");
    }
}
