//! Session manager and the capabilities it is composed from.

pub mod duration;
pub mod id;
pub mod session;
pub mod signer;

// Re-export commonly used types
pub use duration::{DurationParser, HumantimeParser};
pub use id::{IdGenerator, UuidGenerator};
pub use session::{SessionTokenManager, ENTRY_MARKER};
pub use signer::{JwtSigner, Signer};
