mod geo_database;

pub use geo_database::{DatabaseMetadata, GeoDatabase, GeoDatabaseOpener, RawGeoRecord};
