//! Shared configuration and value types for jwt-redis
//!
//! This crate provides the pieces every other crate in the workspace agrees on:
//! - Configuration types (session registry, JWT signing, Redis, logging)
//! - The `TimeSpan` value used for every expiry option

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, Environment, JwtConfig, LogFormat, LoggingConfig, SessionConfig,
};
pub use types::TimeSpan;
