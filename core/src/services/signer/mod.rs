//! Token signing capability
//!
//! The session manager never touches signature algorithms directly; it
//! consumes a [`Signer`]. [`JwtSigner`] is the default implementation on top
//! of `jsonwebtoken`.

mod jwt;
mod traits;


pub use jwt::JwtSigner;
pub use traits::Signer;
