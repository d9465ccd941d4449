//! Cache module for the Redis-backed session registry
//!
//! - `redis_client` - Connection handling, retries and raw commands
//! - `session_registry` - `SessionRegistry` implementation on top of the client

pub mod redis_client;
pub mod session_registry;


pub use redis_client::RedisClient;
pub use session_registry::RedisSessionRegistry;

pub use jr_shared::config::CacheConfig;
