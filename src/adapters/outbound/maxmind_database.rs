//! MaxMind Database Adapter
//!
//! Implements the GeoDatabase port over a MaxMind GeoIP2/GeoLite2 file.

use crate::domain::ports::{DatabaseMetadata, GeoDatabase, GeoDatabaseOpener, RawGeoRecord};
use anyhow::Context;
use maxminddb::Reader;
use serde::Deserialize;
use std::collections::HashMap;
use std::net::IpAddr;
use tracing::info;

/// Record shape decoded from a city-level database.
///
/// Everything is optional here; shape validation is the resolver's job.
#[derive(Debug, Deserialize)]
struct CityData {
    country: Option<CountryData>,
    city: Option<NamesData>,
    location: Option<LocationData>,
}

#[derive(Debug, Deserialize)]
struct CountryData {
    iso_code: Option<String>,
    names: Option<HashMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct NamesData {
    names: Option<HashMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct LocationData {
    latitude: Option<f64>,
    longitude: Option<f64>,
    time_zone: Option<String>,
}

/// An open MaxMind database file.
pub struct MaxMindDatabase {
    reader: Reader<Vec<u8>>,
}

impl GeoDatabase for MaxMindDatabase {
    fn lookup(&self, address: IpAddr) -> anyhow::Result<(RawGeoRecord, u8)> {
        let (data, prefix_len): (CityData, usize) = self
            .reader
            .lookup_prefix(address)
            .with_context(|| format!("maxmind lookup for {address}"))?;

        // The tree stores IPv4 in the mapped IPv6 space; report the prefix
        // relative to the queried family.
        let prefix_len = match address {
            IpAddr::V4(_) if prefix_len > 32 => prefix_len - 96,
            _ => prefix_len,
        } as u8;

        let raw = RawGeoRecord {
            country_iso_code: data.country.as_ref().and_then(|c| c.iso_code.clone()),
            country_names: data
                .country
                .and_then(|c| c.names)
                .unwrap_or_default(),
            city_names: data.city.and_then(|c| c.names),
            latitude: data.location.as_ref().and_then(|l| l.latitude),
            longitude: data.location.as_ref().and_then(|l| l.longitude),
            time_zone: data.location.and_then(|l| l.time_zone),
        };

        Ok((raw, prefix_len))
    }

    fn metadata(&self) -> DatabaseMetadata {
        let md = &self.reader.metadata;
        DatabaseMetadata {
            ip_version: md.ip_version,
            database_type: md.database_type.clone(),
            // each node holds two records of record_size bits
            search_tree_size: u64::from(md.node_count) * u64::from(md.record_size) / 4,
        }
    }
}

/// Opens MaxMind database files from a configured path.
pub struct MaxMindOpener {
    path: String,
}

impl MaxMindOpener {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl GeoDatabaseOpener for MaxMindOpener {
    fn open(&self) -> anyhow::Result<Box<dyn GeoDatabase>> {
        let reader = Reader::open_readfile(&self.path)
            .with_context(|| format!("opening maxmind database at {}", self.path))?;
        info!("maxmind database loaded from {}", self.path);
        Ok(Box::new(MaxMindDatabase { reader }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_nonexistent_path_fails() {
        let opener = MaxMindOpener::new("/nonexistent/GeoLite2-City.mmdb");
        assert!(opener.open().is_err());
    }

    #[test]
    fn test_open_garbage_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not an mmdb file").unwrap();

        let opener = MaxMindOpener::new(file.path().to_string_lossy().to_string());
        assert!(opener.open().is_err());
    }
}
