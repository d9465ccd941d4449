//! # Infrastructure Layer
//!
//! Concrete implementations behind the session manager's seams:
//! - **Cache**: Redis client and the Redis-backed session registry
//! - **Logging**: `tracing` subscriber setup driven by `LoggingConfig`
//! - **Settings**: layered configuration loading (defaults, TOML file, environment)

// Re-export core types for convenience
pub use jr_core::errors::*;

/// Cache module - Redis client and session registry
pub mod cache;

/// Logging initialisation
pub mod logging;

/// Configuration loading
pub mod settings;

pub use cache::{RedisClient, RedisSessionRegistry};
pub use logging::init_tracing;

use jr_core::{JwtSigner, SessionTokenManager};
use jr_shared::AppConfig;

/// Session manager wired to Redis
pub type RedisSessionManager = SessionTokenManager<RedisSessionRegistry, JwtSigner>;

/// Connect to Redis and build a session manager from the loaded configuration
///
/// Fails if Redis cannot be reached within the configured retries.
pub async fn initialize(config: &AppConfig) -> Result<RedisSessionManager, InfrastructureError> {
    tracing::info!("Initializing session infrastructure ({})", config.environment);

    let registry = RedisSessionRegistry::connect(config.cache.clone()).await?;
    if !registry.health_check().await? {
        return Err(InfrastructureError::General(
            "Redis did not answer PING".to_string(),
        ));
    }

    tracing::info!("Session infrastructure initialized successfully");
    Ok(SessionTokenManager::with_defaults(registry, config.session.clone()))
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<config::ConfigError> for InfrastructureError {
    fn from(err: config::ConfigError) -> Self {
        InfrastructureError::Config(err.to_string())
    }
}

impl From<InfrastructureError> for SessionError {
    fn from(err: InfrastructureError) -> Self {
        SessionError::registry(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_error_maps_to_registry_error() {
        let err: SessionError = InfrastructureError::General("boom".to_string()).into();
        assert_eq!(err.kind(), SessionErrorKind::Registry);
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_redis_error_conversion() {
        let redis_err = redis::RedisError::from((redis::ErrorKind::IoError, "connection refused"));
        let err = InfrastructureError::from(redis_err);
        assert!(matches!(err, InfrastructureError::Cache(_)));
        assert!(err.to_string().starts_with("Cache error:"));
    }
}
