//! Domain Errors
//!
//! Every failure in the resolution core surfaces synchronously through this
//! enum, carrying enough context (cause, metadata, or queried address) to
//! diagnose. Nothing is retried internally.

use crate::domain::ports::DatabaseMetadata;
use std::net::IpAddr;

#[derive(Debug, thiserror::Error)]
pub enum GeoIpError {
    /// The database file could not be opened or parsed. Fatal for the
    /// resolver until a valid file is supplied.
    #[error("unable to initialize geo database reader")]
    ReaderInit(#[source] anyhow::Error),

    /// The database metadata failed validation.
    #[error(
        "unsupported geo database: ip_version={} database_type={:?} search_tree_size={}",
        .metadata.ip_version,
        .metadata.database_type,
        .metadata.search_tree_size
    )]
    UnsupportedDatabase { metadata: DatabaseMetadata },

    /// The lookup failed, or succeeded without a usable geolocation.
    /// Per-call: it poisons neither the cache nor the reader handle.
    #[error("unable to localize {address}: {reason}")]
    LookupFailed {
        address: IpAddr,
        reason: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Raised by the time-zone accessor when the record carries no time
    /// zone: the country-level fallback is a deliberate feature gap.
    #[error("time zone fallback not implemented")]
    NotImplemented,
}

impl GeoIpError {
    /// Lookup that completed without error but returned no usable record.
    pub(crate) fn not_found(address: IpAddr) -> Self {
        Self::LookupFailed {
            address,
            reason: "Not found".to_string(),
            source: None,
        }
    }

    /// Lookup that failed inside the database reader.
    pub(crate) fn lookup(address: IpAddr, source: anyhow::Error) -> Self {
        Self::LookupFailed {
            address,
            reason: source.to_string(),
            source: Some(source),
        }
    }
}
