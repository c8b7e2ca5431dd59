//! Database Validator Service
//!
//! Checks database metadata against the shape this resolver requires,
//! before the first lookup through a freshly opened handle.

use crate::domain::errors::GeoIpError;
use crate::domain::ports::DatabaseMetadata;

/// Heuristic lower bound rejecting stripped-down or wrong-purpose files.
const MIN_SEARCH_TREE_SIZE: u64 = 10 * 1024 * 1024;

/// Accepted city-level database types (commercial and free naming).
const ACCEPTED_DATABASE_TYPES: [&str; 2] = ["GeoIP2-City", "GeoLite2-City"];

/// Validator for database metadata.
///
/// All checks must hold:
/// 1. Addresses are stored IPv6-normalized (`ip_version == 6`), so IPv4
///    queries share the IPv6 lookup path.
/// 2. The database is a city-level one, matched case-insensitively.
/// 3. The search tree is at least 10 MiB.
pub struct DatabaseValidator;

impl DatabaseValidator {
    /// Validate metadata, returning `UnsupportedDatabase` with the offending
    /// metadata embedded on any failed check.
    pub fn validate(metadata: &DatabaseMetadata) -> Result<(), GeoIpError> {
        let type_ok = ACCEPTED_DATABASE_TYPES
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&metadata.database_type));

        if metadata.ip_version != 6
            || !type_ok
            || metadata.search_tree_size < MIN_SEARCH_TREE_SIZE
        {
            return Err(GeoIpError::UnsupportedDatabase {
                metadata: metadata.clone(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city_metadata() -> DatabaseMetadata {
        DatabaseMetadata {
            ip_version: 6,
            database_type: "GeoLite2-City".to_string(),
            search_tree_size: 16 * 1024 * 1024,
        }
    }

    #[test]
    fn test_accepts_city_database() {
        assert!(DatabaseValidator::validate(&city_metadata()).is_ok());
    }

    #[test]
    fn test_accepts_commercial_naming() {
        let mut md = city_metadata();
        md.database_type = "GeoIP2-City".to_string();
        assert!(DatabaseValidator::validate(&md).is_ok());
    }

    #[test]
    fn test_accepts_case_insensitive_type() {
        let mut md = city_metadata();
        md.database_type = "geolite2-city".to_string();
        assert!(DatabaseValidator::validate(&md).is_ok());
    }

    #[test]
    fn test_rejects_ipv4_database() {
        let mut md = city_metadata();
        md.ip_version = 4;

        let err = DatabaseValidator::validate(&md).unwrap_err();
        assert!(matches!(err, GeoIpError::UnsupportedDatabase { .. }));
    }

    #[test]
    fn test_rejects_country_database() {
        let mut md = city_metadata();
        md.database_type = "GeoIP2-Country".to_string();

        assert!(DatabaseValidator::validate(&md).is_err());
    }

    #[test]
    fn test_rejects_small_search_tree() {
        let mut md = city_metadata();
        md.search_tree_size = 1024;

        assert!(DatabaseValidator::validate(&md).is_err());
    }

    #[test]
    fn test_rejects_exactly_below_bound() {
        let mut md = city_metadata();
        md.search_tree_size = 10 * 1024 * 1024 - 1;
        assert!(DatabaseValidator::validate(&md).is_err());

        md.search_tree_size = 10 * 1024 * 1024;
        assert!(DatabaseValidator::validate(&md).is_ok());
    }

    #[test]
    fn test_error_embeds_offending_metadata() {
        let mut md = city_metadata();
        md.ip_version = 4;

        match DatabaseValidator::validate(&md).unwrap_err() {
            GeoIpError::UnsupportedDatabase { metadata } => assert_eq!(metadata, md),
            other => panic!("unexpected error: {other}"),
        }
    }
}
