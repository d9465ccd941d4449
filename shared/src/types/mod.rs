//! Common value types shared across crates.

pub mod time_span;

pub use time_span::TimeSpan;
