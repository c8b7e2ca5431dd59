//! Infrastructure Layer
//!
//! Cross-cutting components with no domain knowledge.

pub mod bounded_cache;

pub use bounded_cache::BoundedCache;
