pub mod registry;

pub use registry::{InMemoryRegistry, SessionRegistry};
