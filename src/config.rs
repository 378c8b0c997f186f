use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::constants::{
    DEFAULT_EVENTS_TTL_MS, DEFAULT_FORECAST_TTL_MS, DEFAULT_PLACES_TTL_MS, DEFAULT_TRAILS_TTL_MS,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub providers: ProvidersConfig,

    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/cityscout.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Shared timeout for all outbound provider requests.
    pub request_timeout_seconds: u64,

    pub geocode_api_key: String,

    pub darksky_api_key: String,

    pub yelp_api_key: String,

    pub eventbrite_api_key: String,

    pub hiking_api_key: String,

    pub tmdb_api_key: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 30,
            geocode_api_key: String::new(),
            darksky_api_key: String::new(),
            yelp_api_key: String::new(),
            eventbrite_api_key: String::new(),
            hiking_api_key: String::new(),
            tmdb_api_key: String::new(),
        }
    }
}

/// Per-category staleness thresholds. Milliseconds across the board; the
/// loader rejects zeroes rather than trusting downstream arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub forecast_ttl_ms: u64,

    pub places_ttl_ms: u64,

    pub events_ttl_ms: u64,

    pub trails_ttl_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            forecast_ttl_ms: DEFAULT_FORECAST_TTL_MS,
            places_ttl_ms: DEFAULT_PLACES_TTL_MS,
            events_ttl_ms: DEFAULT_EVENTS_TTL_MS,
            trails_ttl_ms: DEFAULT_TRAILS_TTL_MS,
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub const fn forecast_ttl(&self) -> Duration {
        Duration::from_millis(self.forecast_ttl_ms)
    }

    #[must_use]
    pub const fn places_ttl(&self) -> Duration {
        Duration::from_millis(self.places_ttl_ms)
    }

    #[must_use]
    pub const fn events_ttl(&self) -> Duration {
        Duration::from_millis(self.events_ttl_ms)
    }

    #[must_use]
    pub const fn trails_ttl(&self) -> Duration {
        Duration::from_millis(self.trails_ttl_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            providers: ProvidersConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.apply_env_overrides();
        Ok(config)
    }

    /// Environment wins over file config for API keys, so keys can be kept
    /// out of config.toml entirely.
    fn apply_env_overrides(&mut self) {
        let overrides = [
            ("GEOCODE_API_KEY", &mut self.providers.geocode_api_key),
            ("DARKSKY_API_KEY", &mut self.providers.darksky_api_key),
            ("YELP_API_KEY", &mut self.providers.yelp_api_key),
            ("EVENTBRITE_API_KEY", &mut self.providers.eventbrite_api_key),
            ("HIKING_API_KEY", &mut self.providers.hiking_api_key),
            ("TMDB_API_KEY", &mut self.providers.tmdb_api_key),
        ];

        for (var, slot) in overrides {
            if let Ok(value) = std::env::var(var)
                && !value.is_empty()
            {
                *slot = value;
            }
        }
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("cityscout").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".cityscout").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("server.port cannot be 0");
        }

        if self.general.max_db_connections == 0 {
            anyhow::bail!("general.max_db_connections cannot be 0");
        }

        if self.providers.request_timeout_seconds == 0 {
            anyhow::bail!("providers.request_timeout_seconds cannot be 0");
        }

        let ttls = [
            ("cache.forecast_ttl_ms", self.cache.forecast_ttl_ms),
            ("cache.places_ttl_ms", self.cache.places_ttl_ms),
            ("cache.events_ttl_ms", self.cache.events_ttl_ms),
            ("cache.trails_ttl_ms", self.cache.trails_ttl_ms),
        ];

        for (name, value) in ttls {
            if value == 0 {
                anyhow::bail!("{name} must be a positive number of milliseconds");
            }
        }

        Ok(())
    }

    /// Names of providers with no configured API key. Informational only;
    /// those categories fail at request time with a provider fault.
    #[must_use]
    pub fn missing_api_keys(&self) -> Vec<&'static str> {
        let keys = [
            ("geocode", &self.providers.geocode_api_key),
            ("darksky", &self.providers.darksky_api_key),
            ("yelp", &self.providers.yelp_api_key),
            ("eventbrite", &self.providers.eventbrite_api_key),
            ("hiking", &self.providers.hiking_api_key),
            ("tmdb", &self.providers.tmdb_api_key),
        ];

        keys.into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect()
    }
}
