//! Relay server configuration

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::config::RelaySettings;

/// Configuration for the webhook relay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Server bind address
    pub bind_address: SocketAddr,

    /// Origin allowed by CORS; any origin when `None`
    pub allowed_origin: Option<String>,

    /// Enable per-request trace logging
    pub enable_request_logging: bool,
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind(),
            allowed_origin: Some("http://localhost:4200".to_string()),
            enable_request_logging: true,
        }
    }
}

impl RelayConfig {
    pub fn builder() -> RelayConfigBuilder {
        RelayConfigBuilder::default()
    }

    /// Relay config from the `[relay]` section of the application config
    pub fn from_settings(settings: &RelaySettings) -> Self {
        Self {
            bind_address: settings.bind_address,
            allowed_origin: settings.allowed_origin.clone(),
            enable_request_logging: true,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(origin) = &self.allowed_origin {
            let parsed = url::Url::parse(origin).map_err(|e| ConfigError::InvalidValue {
                field: "allowed_origin".to_string(),
                reason: format!("{origin}: {e}"),
            })?;

            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidValue {
                    field: "allowed_origin".to_string(),
                    reason: format!("Origin must be http or https: {origin}"),
                });
            }
        }

        Ok(())
    }
}

/// Builder for RelayConfig
#[derive(Debug, Default)]
pub struct RelayConfigBuilder {
    bind_address: Option<SocketAddr>,
    allowed_origin: Option<Option<String>>,
    enable_request_logging: Option<bool>,
}

impl RelayConfigBuilder {
    pub fn bind_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = Some(addr);
        self
    }

    /// Set bind address from string
    pub fn bind_address_str(mut self, addr: &str) -> Result<Self, ConfigError> {
        self.bind_address = Some(addr.parse().map_err(|_| ConfigError::InvalidValue {
            field: "bind_address".to_string(),
            reason: format!("Invalid address: {addr}"),
        })?);
        Ok(self)
    }

    pub fn allowed_origin(mut self, origin: impl Into<String>) -> Self {
        self.allowed_origin = Some(Some(origin.into()));
        self
    }

    /// Accept requests from any origin
    pub fn any_origin(mut self) -> Self {
        self.allowed_origin = Some(None);
        self
    }

    pub fn enable_request_logging(mut self, enable: bool) -> Self {
        self.enable_request_logging = Some(enable);
        self
    }

    pub fn build(self) -> Result<RelayConfig, ConfigError> {
        let defaults = RelayConfig::default();
        let config = RelayConfig {
            bind_address: self.bind_address.unwrap_or(defaults.bind_address),
            allowed_origin: self.allowed_origin.unwrap_or(defaults.allowed_origin),
            enable_request_logging: self
                .enable_request_logging
                .unwrap_or(defaults.enable_request_logging),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{field}': {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RelayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address.to_string(), "0.0.0.0:3000");
        assert_eq!(
            config.allowed_origin.as_deref(),
            Some("http://localhost:4200")
        );
    }

    #[test]
    fn test_config_builder() {
        let config = RelayConfig::builder()
            .bind_address_str("127.0.0.1:9000")
            .unwrap()
            .allowed_origin("https://pokedex.example")
            .enable_request_logging(false)
            .build()
            .unwrap();

        assert_eq!(config.bind_address.port(), 9000);
        assert_eq!(
            config.allowed_origin.as_deref(),
            Some("https://pokedex.example")
        );
        assert!(!config.enable_request_logging);
    }

    #[test]
    fn test_any_origin() {
        let config = RelayConfig::builder().any_origin().build().unwrap();
        assert!(config.allowed_origin.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(RelayConfig::builder().bind_address_str("nope").is_err());
        assert!(RelayConfig::builder()
            .allowed_origin("ftp://files.example")
            .build()
            .is_err());
        assert!(RelayConfig::builder()
            .allowed_origin("not an origin")
            .build()
            .is_err());
    }

    #[test]
    fn test_from_settings() {
        let settings = RelaySettings {
            bind_address: "127.0.0.1:8081".parse().unwrap(),
            allowed_origin: None,
        };
        let config = RelayConfig::from_settings(&settings);
        assert_eq!(config.bind_address.port(), 8081);
        assert!(config.allowed_origin.is_none());
    }
}
