//! Adapters Layer
//!
//! Concrete implementations of the domain ports.

pub mod outbound;
