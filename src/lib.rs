//! ipgeo - IP geolocation resolution with a bounded result cache
//!
//! Resolves an IP address to geolocation facts (country, city, coordinates,
//! time zone, enclosing subnet) from a city-level MaxMind database, fronted
//! by an insertion-ordered cache with deterministic batch eviction.
//!
//! ```rust,ignore
//! use ipgeo::{resolver_from_config, Config};
//!
//! let resolver = resolver_from_config(&Config::default());
//! let code = resolver.country_code("8.8.8.8".parse()?)?;
//! assert_eq!(code, "US");
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use adapters::outbound::{MaxMindDatabase, MaxMindOpener};
pub use application::{GeoResolver, DEFAULT_CACHE_CAPACITY};
pub use config::{load_config, Config};
pub use domain::entities::{City, Coordinates, Country, GeoRecord, Location, Subnet};
pub use domain::errors::GeoIpError;
pub use domain::ports::{DatabaseMetadata, GeoDatabase, GeoDatabaseOpener, RawGeoRecord};
pub use domain::services::{DatabaseValidator, NameLocalizer, SubnetDeriver};
pub use infrastructure::BoundedCache;

use std::sync::Arc;

/// Wire a resolver over the MaxMind adapter from configuration.
///
/// Opening is lazy: an invalid path surfaces as `ReaderInit` on the first
/// lookup, not here.
pub fn resolver_from_config(cfg: &Config) -> GeoResolver {
    let opener = Arc::new(MaxMindOpener::new(cfg.db_path.clone()));
    GeoResolver::new(opener, cfg.cache_capacity)
}
