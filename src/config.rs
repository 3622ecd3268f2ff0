//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::DEFAULT_CACHE_TTL_SECS;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Database connection string for the product store
    pub database_url: String,
    /// Directory where uploaded product images are stored
    pub image_dir: PathBuf,
    /// Freshness window in seconds for the product list snapshot
    pub cache_ttl: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 5000)
    /// - `DATABASE_URL` - Store connection string (default: `sqlite:products.db?mode=rwc`)
    /// - `IMAGE_DIR` - Image directory (default: `public/images`)
    /// - `CACHE_TTL` - Snapshot freshness window in seconds (default: 3)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:products.db?mode=rwc".to_string()),
            image_dir: env::var("IMAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public/images")),
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 5000,
            database_url: "sqlite:products.db?mode=rwc".to_string(),
            image_dir: PathBuf::from("public/images"),
            cache_ttl: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 5000);
        assert_eq!(config.database_url, "sqlite:products.db?mode=rwc");
        assert_eq!(config.image_dir, PathBuf::from("public/images"));
        assert_eq!(config.cache_ttl, 3);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("DATABASE_URL");
        env::remove_var("IMAGE_DIR");
        env::remove_var("CACHE_TTL");

        let config = Config::from_env();
        assert_eq!(config.server_port, 5000);
        assert_eq!(config.database_url, "sqlite:products.db?mode=rwc");
        assert_eq!(config.image_dir, PathBuf::from("public/images"));
        assert_eq!(config.cache_ttl, 3);
    }
}
