//! Domain Layer
//!
//! Entities, ports and pure services of the geolocation core. Nothing in
//! this layer touches the database format or the filesystem.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
