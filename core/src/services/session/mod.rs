//! Session token manager module
//!
//! This module keeps signed tokens and registry entries in step:
//! - Signing writes a registry entry mirroring the token's lifetime
//! - Verification requires a live registry entry before checking the signature
//! - Touch slides the lifetime of registry-governed (`expk`) tokens
//! - Destroy revokes a token by deleting its entry

mod manager;

#[cfg(test)]
mod tests;

pub use manager::{SessionTokenManager, ENTRY_MARKER};
