//! Geo Database Port
//!
//! Defines the interface to the binary geolocation database. The tree-search
//! format itself lives behind this boundary; implementations may use MaxMind
//! GeoIP2/GeoLite2 files or in-memory fakes for tests.

use std::collections::HashMap;
use std::net::IpAddr;

/// Metadata reported by an open database handle.
///
/// Read once at initialization for validation, never cached beyond the
/// handle's own lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseMetadata {
    /// IP version the database stores addresses in (6 for IPv6-normalized)
    pub ip_version: u16,
    /// Database type string, e.g. "GeoLite2-City"
    pub database_type: String,
    /// Size of the search tree in bytes
    pub search_tree_size: u64,
}

/// Untyped record as stored in the database, before shape validation.
///
/// Every field is optional; the resolver decides whether the shape is
/// usable. Adapters only translate, they never reject.
#[derive(Debug, Clone, Default)]
pub struct RawGeoRecord {
    pub country_iso_code: Option<String>,
    pub country_names: HashMap<String, String>,
    pub city_names: Option<HashMap<String, String>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub time_zone: Option<String>,
}

/// An open geolocation database handle.
///
/// This is an outbound port. Lookups are synchronous and potentially
/// latency-bearing; the port defines no timeout or cancellation. Dropping
/// the handle closes it (closing cannot fail).
pub trait GeoDatabase: Send + Sync {
    /// Look up an address, returning the raw record and the prefix length
    /// of the matched network, relative to the queried address family
    /// (0-32 for IPv4, 0-128 for IPv6).
    fn lookup(&self, address: IpAddr) -> anyhow::Result<(RawGeoRecord, u8)>;

    /// Metadata of the open database.
    fn metadata(&self) -> DatabaseMetadata;
}

/// Factory for database handles.
///
/// The resolver opens lazily on first use and re-opens on reload, so it
/// holds a factory rather than a handle.
pub trait GeoDatabaseOpener: Send + Sync {
    fn open(&self) -> anyhow::Result<Box<dyn GeoDatabase>>;
}
