//! Geo Resolver Service - Main application use case
//!
//! Orchestrates resolution: consults the bounded cache, on miss queries the
//! database through the outbound port, validates the record shape, derives
//! the enclosing subnet and stores the result. All typed accessors funnel
//! through the raw resolution path.

use crate::domain::entities::{City, Coordinates, Country, GeoRecord, Location};
use crate::domain::errors::GeoIpError;
use crate::domain::ports::{DatabaseMetadata, GeoDatabase, GeoDatabaseOpener, RawGeoRecord};
use crate::domain::services::{DatabaseValidator, NameLocalizer, SubnetDeriver};
use crate::infrastructure::BoundedCache;
use parking_lot::Mutex;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, trace};

/// Default number of cached records between trims.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Reader handle and cache, guarded as one unit.
///
/// Holding both under a single mutex makes check-cache / query-reader /
/// update-cache one critical section, so two concurrent misses on the same
/// key cannot issue duplicate lookups or double-insert.
struct ResolverState {
    reader: Option<Box<dyn GeoDatabase>>,
    cache: BoundedCache<GeoRecord>,
}

/// IP geolocation resolver with a bounded result cache.
///
/// Owns its database handle and cache; independent instances never share
/// state. The handle is opened lazily on the first lookup and validated
/// once per initialization.
pub struct GeoResolver {
    opener: Arc<dyn GeoDatabaseOpener>,
    state: Mutex<ResolverState>,
}

impl GeoResolver {
    /// Create a resolver over a database opener.
    ///
    /// # Panics
    /// If `cache_capacity` is zero.
    pub fn new(opener: Arc<dyn GeoDatabaseOpener>, cache_capacity: usize) -> Self {
        Self {
            opener,
            state: Mutex::new(ResolverState {
                reader: None,
                cache: BoundedCache::new(cache_capacity),
            }),
        }
    }

    /// Metadata of the underlying database, initializing the reader if
    /// needed.
    pub fn metadata(&self) -> Result<DatabaseMetadata, GeoIpError> {
        let mut state = self.state.lock();
        let reader = Self::reader(&mut state, &*self.opener)?;
        Ok(reader.metadata())
    }

    /// Replace the database handle, e.g. after the file was updated on disk.
    ///
    /// The previous handle is dropped first: closing is best-effort and can
    /// never block obtaining a fresh one. Cached records survive the reload
    /// and age out through normal eviction.
    pub fn reload(&self) -> Result<(), GeoIpError> {
        let mut state = self.state.lock();
        state.reader = None;
        Self::reader(&mut state, &*self.opener)?;
        debug!("geo database reader reloaded");
        Ok(())
    }

    /// Resolve the full record for an address.
    ///
    /// Cache hits return an owned copy of the cached record; misses query
    /// the database, validate the record shape, derive the subnet and cache
    /// the result under the address's canonical string form.
    pub fn resolve_raw(&self, address: IpAddr) -> Result<GeoRecord, GeoIpError> {
        let key = address.to_string();
        let mut state = self.state.lock();

        if let Some(record) = state.cache.get(&key) {
            trace!(%address, "geo cache hit");
            return Ok(record.clone());
        }

        let reader = Self::reader(&mut state, &*self.opener)?;
        let (raw, prefix_len) = reader
            .lookup(address)
            .map_err(|e| GeoIpError::lookup(address, e))?;

        let record = Self::build_record(address, raw, prefix_len)?;
        trace!(%address, subnet = %record.subnet, "geo cache miss resolved");
        state.cache.insert(key, record.clone());

        Ok(record)
    }

    /// ISO 3166-1 country code, always two uppercase characters.
    pub fn country_code(&self, address: IpAddr) -> Result<String, GeoIpError> {
        Ok(self.resolve_raw(address)?.country.iso_code)
    }

    /// Localized country name, English fallback when permitted.
    pub fn country_name(
        &self,
        address: IpAddr,
        locale: &str,
        locale_fallback: bool,
    ) -> Result<Option<String>, GeoIpError> {
        let record = self.resolve_raw(address)?;
        Ok(NameLocalizer::resolve(
            &record.country.names,
            locale,
            locale_fallback,
        ))
    }

    /// Localized city name; `Ok(None)` when the record has no city-level
    /// data or no name for the locale.
    pub fn city_name(
        &self,
        address: IpAddr,
        locale: &str,
        locale_fallback: bool,
    ) -> Result<Option<String>, GeoIpError> {
        let record = self.resolve_raw(address)?;
        Ok(record
            .city
            .and_then(|city| NameLocalizer::resolve(&city.names, locale, locale_fallback)))
    }

    /// Longitude/latitude pair for an address.
    pub fn coordinates(&self, address: IpAddr) -> Result<Coordinates, GeoIpError> {
        let record = self.resolve_raw(address)?;
        Ok(Coordinates {
            longitude: record.location.longitude,
            latitude: record.location.latitude,
        })
    }

    /// IANA time zone for an address.
    ///
    /// `locale_fallback` is reserved for a country-level fallback that does
    /// not exist yet: a record without a time zone fails with
    /// `NotImplemented` rather than `LookupFailed`.
    pub fn time_zone(
        &self,
        address: IpAddr,
        _locale_fallback: bool,
    ) -> Result<String, GeoIpError> {
        let record = self.resolve_raw(address)?;
        match record.location.time_zone {
            Some(tz) if !tz.is_empty() => Ok(tz),
            _ => Err(GeoIpError::NotImplemented),
        }
    }

    /// Get the open reader, initializing and validating it on first use.
    ///
    /// A handle that fails validation is never stored, so a later call
    /// retries initialization from scratch.
    fn reader<'a>(
        state: &'a mut ResolverState,
        opener: &dyn GeoDatabaseOpener,
    ) -> Result<&'a dyn GeoDatabase, GeoIpError> {
        let reader = match &mut state.reader {
            Some(reader) => reader,
            slot @ None => {
                let reader = opener.open().map_err(GeoIpError::ReaderInit)?;
                DatabaseValidator::validate(&reader.metadata())?;
                debug!("geo database reader initialized");
                slot.insert(reader)
            }
        };
        Ok(&**reader)
    }

    /// Turn a raw database record into a typed one, or fail as "Not found".
    ///
    /// A syntactically successful lookup without a usable geolocation is a
    /// failed resolution, even though the reader itself did not error.
    fn build_record(
        address: IpAddr,
        raw: RawGeoRecord,
        prefix_len: u8,
    ) -> Result<GeoRecord, GeoIpError> {
        let iso_code = raw
            .country_iso_code
            .filter(|code| !code.is_empty())
            .ok_or_else(|| GeoIpError::not_found(address))?;
        let latitude = raw
            .latitude
            .ok_or_else(|| GeoIpError::not_found(address))?;
        let longitude = raw
            .longitude
            .ok_or_else(|| GeoIpError::not_found(address))?;

        Ok(GeoRecord {
            country: Country {
                iso_code: iso_code.to_uppercase(),
                names: raw.country_names,
            },
            city: raw.city_names.map(|names| City { names }),
            location: Location {
                latitude,
                longitude,
                time_zone: raw.time_zone,
            },
            subnet: SubnetDeriver::derive(address, prefix_len),
        })
    }
}
