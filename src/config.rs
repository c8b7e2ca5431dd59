use crate::application::DEFAULT_CACHE_CAPACITY;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the city-level database file
    pub db_path: String,
    /// Number of cached records between trims
    pub cache_capacity: usize,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: "data/GeoLite2-City.mmdb".to_string(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            debug: false,
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    let db_path = std::env::var("IPGEO_DB_PATH")
        .unwrap_or_else(|_| "data/GeoLite2-City.mmdb".to_string());

    let cache_capacity = std::env::var("IPGEO_CACHE_CAPACITY")
        .unwrap_or_else(|_| DEFAULT_CACHE_CAPACITY.to_string())
        .parse()
        .unwrap_or(DEFAULT_CACHE_CAPACITY);

    let debug = std::env::var("DEBUG").is_ok();

    Ok(Config {
        db_path,
        cache_capacity,
        debug,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.db_path, "data/GeoLite2-City.mmdb");
        assert_eq!(cfg.cache_capacity, 100);
        assert!(!cfg.debug);
    }

    // env manipulation is kept in a single test so parallel test threads
    // never race on the same variables
    #[test]
    fn test_load_config_env_overrides() {
        std::env::remove_var("IPGEO_DB_PATH");
        std::env::remove_var("IPGEO_CACHE_CAPACITY");

        let cfg = load_config().unwrap();
        assert_eq!(cfg.db_path, "data/GeoLite2-City.mmdb");
        assert_eq!(cfg.cache_capacity, 100);

        std::env::set_var("IPGEO_DB_PATH", "/tmp/GeoIP2-City.mmdb");
        std::env::set_var("IPGEO_CACHE_CAPACITY", "500");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.db_path, "/tmp/GeoIP2-City.mmdb");
        assert_eq!(cfg.cache_capacity, 500);

        // unparsable capacity falls back to the default
        std::env::set_var("IPGEO_CACHE_CAPACITY", "not_a_number");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.cache_capacity, 100);

        std::env::remove_var("IPGEO_DB_PATH");
        std::env::remove_var("IPGEO_CACHE_CAPACITY");
    }

    #[test]
    fn test_config_clone() {
        let cfg = Config::default();
        let cloned = cfg.clone();
        assert_eq!(cfg.db_path, cloned.db_path);
        assert_eq!(cfg.cache_capacity, cloned.cache_capacity);
    }
}
