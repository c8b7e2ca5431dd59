//! Application Layer
//!
//! Use-case orchestration over the domain ports.

pub mod resolver_service;

pub use resolver_service::{GeoResolver, DEFAULT_CACHE_CAPACITY};
