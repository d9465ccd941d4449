//! Session registry: the external store tracking which `jti`s are live.

mod memory;
mod traits;


pub use memory::InMemoryRegistry;
pub use traits::SessionRegistry;
