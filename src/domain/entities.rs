//! Domain Entities - Core geolocation objects
//!
//! These entities represent the resolved facts for one IP address.
//! They are plain value types; cache consumers always receive owned copies.

use std::collections::HashMap;
use std::net::IpAddr;

/// Country-level facts for a resolved address.
#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, uppercased (BR, US, CZ, ...)
    pub iso_code: String,
    /// Locale-keyed display names (e.g. "en" -> "Czechia")
    pub names: HashMap<String, String>,
}

/// City-level facts. Absent on records without a city match.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    /// Locale-keyed display names
    pub names: HashMap<String, String>,
}

/// Coordinates and time zone for a resolved address.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// IANA time zone name (e.g. "Europe/Prague"), when the database has one
    pub time_zone: Option<String>,
}

/// Coordinate pair returned by the coordinates accessor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

/// The network enclosing a queried address.
///
/// The network address is the queried address with all host bits cleared,
/// in the same family as the query. Prefix length is 0-32 for IPv4 and
/// 0-128 for IPv6.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subnet {
    network: IpAddr,
    prefix_len: u8,
}

impl Subnet {
    pub fn new(network: IpAddr, prefix_len: u8) -> Self {
        Self {
            network,
            prefix_len,
        }
    }

    pub fn network(&self) -> IpAddr {
        self.network
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }
}

impl std::fmt::Display for Subnet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len)
    }
}

/// The complete resolved payload for one address.
///
/// A record is only ever constructed in a usable shape: a non-empty country
/// code and both coordinates. Lookups that cannot satisfy that are reported
/// as failures, not partial records.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoRecord {
    pub country: Country,
    pub city: Option<City>,
    pub location: Location,
    pub subnet: Subnet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn names(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_subnet_accessors() {
        let subnet = Subnet::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 0)), 24);

        assert_eq!(subnet.network(), IpAddr::V4(Ipv4Addr::new(8, 8, 8, 0)));
        assert_eq!(subnet.prefix_len(), 24);
    }

    #[test]
    fn test_subnet_display() {
        let subnet = Subnet::new(IpAddr::V4(Ipv4Addr::new(77, 75, 75, 0)), 24);
        assert_eq!(subnet.to_string(), "77.75.75.0/24");
    }

    #[test]
    fn test_record_clone_is_independent() {
        let record = GeoRecord {
            country: Country {
                iso_code: "CZ".to_string(),
                names: names(&[("en", "Czechia")]),
            },
            city: Some(City {
                names: names(&[("en", "Prague")]),
            }),
            location: Location {
                latitude: 50.08,
                longitude: 14.42,
                time_zone: Some("Europe/Prague".to_string()),
            },
            subnet: Subnet::new(IpAddr::V4(Ipv4Addr::new(77, 75, 75, 0)), 24),
        };

        let mut cloned = record.clone();
        assert_eq!(cloned, record);

        cloned.subnet = Subnet::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), 0);
        assert_ne!(cloned.subnet, record.subnet);
        assert_eq!(record.subnet.prefix_len(), 24);
    }
}
