//! Configuration Module
//!
//! Handles loading client configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

use crate::error::{PokedexError, Result};

/// Default PokeAPI root
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache time-to-live in seconds
    pub cache_interval: u64,
    /// Seconds between reap runs, defaults to the TTL
    pub reap_interval: u64,
    /// PokeAPI root URL without a trailing slash
    pub base_url: String,
    /// Location areas per `map` page
    pub page_size: u32,
    /// Where the caught Pokemon are saved
    pub pokedex_file: PathBuf,
    /// HTTP request timeout in seconds
    pub http_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_CACHE_INTERVAL_SECS` - Cache TTL (default: 5)
    /// - `POKEDEX_REAP_INTERVAL_SECS` - Reap period (default: cache TTL)
    /// - `POKEAPI_BASE_URL` - API root (default: https://pokeapi.co/api/v2)
    /// - `POKEDEX_PAGE_SIZE` - Locations per page (default: 20)
    /// - `POKEDEX_FILE` - Saved Pokedex path (default: XDG data dir)
    /// - `POKEDEX_HTTP_TIMEOUT_SECS` - Request timeout (default: 10)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let cache_interval = parse_var("POKEDEX_CACHE_INTERVAL_SECS", defaults.cache_interval);
        let reap_interval = parse_var("POKEDEX_REAP_INTERVAL_SECS", cache_interval);
        let page_size = parse_var("POKEDEX_PAGE_SIZE", defaults.page_size);
        let http_timeout = parse_var("POKEDEX_HTTP_TIMEOUT_SECS", defaults.http_timeout);

        if cache_interval == 0 {
            return Err(PokedexError::Config(
                "POKEDEX_CACHE_INTERVAL_SECS must be greater than zero".to_string(),
            ));
        }
        if reap_interval == 0 {
            return Err(PokedexError::Config(
                "POKEDEX_REAP_INTERVAL_SECS must be greater than zero".to_string(),
            ));
        }
        if page_size == 0 {
            return Err(PokedexError::Config(
                "POKEDEX_PAGE_SIZE must be greater than zero".to_string(),
            ));
        }

        let base_url = env::var("POKEAPI_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let pokedex_file = env::var("POKEDEX_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.pokedex_file);

        Ok(Self {
            cache_interval,
            reap_interval,
            base_url,
            page_size,
            pokedex_file,
            http_timeout,
        })
    }

    /// Cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_interval)
    }

    /// Reap period as a Duration.
    pub fn reap_period(&self) -> Duration {
        Duration::from_secs(self.reap_interval)
    }

    /// HTTP timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_interval: 5,
            reap_interval: 5,
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 20,
            pokedex_file: default_pokedex_file(),
            http_timeout: 10,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// `~/.local/share/pokedex/pokedex.json` on Linux, or the platform equivalent.
/// Falls back to the working directory when no home directory is known.
fn default_pokedex_file() -> PathBuf {
    ProjectDirs::from("", "", "pokedex")
        .map(|dirs| dirs.data_dir().join("pokedex.json"))
        .unwrap_or_else(|| PathBuf::from("pokedex.json"))
}
