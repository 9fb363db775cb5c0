//! Configuration management for the pokedex client
//!
//! This module handles loading and validating configuration from environment variables
//! and TOML files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_SPRITE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote catalog configuration
    pub catalog: CatalogConfig,

    /// Pagination and search tuning
    pub pagination: PaginationConfig,

    /// Favorites storage configuration
    pub favorites: FavoritesConfig,

    /// Outbound event notifications
    #[serde(default)]
    pub notifications: NotificationsConfig,

    /// Webhook relay server
    pub relay: RelaySettings,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Remote catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the REST API
    pub base_url: String,

    /// Base URL used to construct sprite images by id
    pub sprite_base_url: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent string
    pub user_agent: String,
}

/// Pagination and search tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Items per page
    pub page_size: usize,

    /// Quiet period before a typed search term is dispatched
    pub debounce_ms: u64,

    /// How many listing entries the partial-name fallback scans
    pub fallback_scan_limit: usize,

    /// Maximum number of partial-name matches returned
    pub fallback_result_cap: usize,
}

/// Favorites storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesConfig {
    /// JSON file holding the favorite ids
    pub path: PathBuf,
}

/// Outbound event notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Relay endpoint receiving favorites events; disabled when unset
    pub webhook_url: Option<String>,

    /// Delivery timeout in seconds
    #[serde(default = "default_notify_timeout")]
    pub timeout_secs: u64,
}

fn default_notify_timeout() -> u64 {
    5
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_secs: default_notify_timeout(),
        }
    }
}

/// Webhook relay server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaySettings {
    /// Address the relay listens on
    pub bind_address: SocketAddr,

    /// Origin allowed by CORS; any origin when unset
    pub allowed_origin: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let base_url =
            std::env::var("POKEDEX_API_URL").unwrap_or(defaults.catalog.base_url);

        let sprite_base_url =
            std::env::var("POKEDEX_SPRITE_URL").unwrap_or(defaults.catalog.sprite_base_url);

        let request_timeout_secs = env_parse("POKEDEX_REQUEST_TIMEOUT")
            .unwrap_or(defaults.catalog.request_timeout_secs);

        let user_agent = std::env::var("POKEDEX_USER_AGENT").unwrap_or(defaults.catalog.user_agent);

        let page_size = env_parse("POKEDEX_PAGE_SIZE").unwrap_or(defaults.pagination.page_size);

        let debounce_ms =
            env_parse("POKEDEX_DEBOUNCE_MS").unwrap_or(defaults.pagination.debounce_ms);

        let favorites_path = std::env::var("POKEDEX_FAVORITES_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.favorites.path);

        let webhook_url = std::env::var("POKEDEX_WEBHOOK_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        // PORT and SERVER_API mirror the standalone relay's historical settings
        let bind_address = match std::env::var("POKEDEX_RELAY_ADDR") {
            Ok(addr) => addr
                .parse()
                .with_context(|| format!("Invalid POKEDEX_RELAY_ADDR: {addr}"))?,
            Err(_) => match env_parse::<u16>("PORT") {
                Some(port) => SocketAddr::from(([0, 0, 0, 0], port)),
                None => defaults.relay.bind_address,
            },
        };

        let allowed_origin = std::env::var("SERVER_API")
            .ok()
            .or(defaults.relay.allowed_origin);

        let log_level = std::env::var("POKEDEX_LOG_LEVEL").unwrap_or(defaults.logging.level);

        let log_format = std::env::var("POKEDEX_LOG_FORMAT").unwrap_or(defaults.logging.format);

        Ok(Self {
            catalog: CatalogConfig {
                base_url,
                sprite_base_url,
                request_timeout_secs,
                user_agent,
            },
            pagination: PaginationConfig {
                page_size,
                debounce_ms,
                ..defaults.pagination
            },
            favorites: FavoritesConfig {
                path: favorites_path,
            },
            notifications: NotificationsConfig {
                webhook_url,
                ..defaults.notifications
            },
            relay: RelaySettings {
                bind_address,
                allowed_origin,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.catalog.base_url)
            .with_context(|| format!("Invalid catalog base_url: {}", self.catalog.base_url))?;

        if self.catalog.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.pagination.page_size == 0 {
            anyhow::bail!("page_size must be greater than 0");
        }

        if self.pagination.fallback_result_cap == 0 {
            anyhow::bail!("fallback_result_cap must be greater than 0");
        }

        if let Some(webhook_url) = &self.notifications.webhook_url {
            Url::parse(webhook_url)
                .with_context(|| format!("Invalid notifications webhook_url: {webhook_url}"))?;
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.request_timeout_secs)
    }

    /// Get the search debounce window as Duration
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.pagination.debounce_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig {
                base_url: String::from(DEFAULT_API_URL),
                sprite_base_url: String::from(DEFAULT_SPRITE_URL),
                request_timeout_secs: 30,
                user_agent: format!("pokedex/{}", env!("CARGO_PKG_VERSION")),
            },
            pagination: PaginationConfig::default(),
            favorites: FavoritesConfig {
                path: PathBuf::from("data/favorites.json"),
            },
            notifications: NotificationsConfig::default(),
            relay: RelaySettings {
                bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
                allowed_origin: Some(String::from("http://localhost:4200")),
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            debounce_ms: 300,
            fallback_scan_limit: 1000,
            fallback_result_cap: 20,
        }
    }
}
