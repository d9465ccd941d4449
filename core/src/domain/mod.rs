//! Domain types: claims, call options, signing secrets and configured keys.

pub mod claims;
pub mod keys;
pub mod options;
pub mod secret;

pub use claims::{Claims, CompleteToken};
pub use jr_shared::TimeSpan;
pub use keys::SigningKeys;
pub use options::{SignOptions, VerifyOptions};
pub use secret::Secret;
