//! # jwt-redis Core
//!
//! Revocable JWT sessions. Tokens are signed and self-contained, and every
//! issued token is mirrored by an entry in an external registry keyed by its
//! `jti`. A token is accepted only while both its signature/claims and its
//! registry entry are valid, which makes revocation and sliding expiry
//! possible without reissuing tokens.
//!
//! This crate contains the domain types, the capability traits the manager
//! is composed from, default implementations of those capabilities, and the
//! `SessionTokenManager` itself.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
