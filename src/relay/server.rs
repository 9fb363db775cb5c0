//! Relay server
//!
//! Wraps the router with CORS and request tracing and serves it over TCP.

use std::net::SocketAddr;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::api::create_router;
use super::config::RelayConfig;

/// Passive webhook relay
pub struct RelayServer {
    config: RelayConfig,
}

impl RelayServer {
    /// # Errors
    ///
    /// Returns `ServerError::ConfigError` if the configuration does not validate
    pub fn new(config: RelayConfig) -> Result<Self, ServerError> {
        config
            .validate()
            .map_err(|e| ServerError::ConfigError(e.to_string()))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    fn cors_layer(&self) -> Result<CorsLayer, ServerError> {
        let origin = match &self.config.allowed_origin {
            Some(origin) => AllowOrigin::exact(
                HeaderValue::from_str(origin.trim_end_matches('/'))
                    .map_err(|e| ServerError::ConfigError(format!("allowed_origin: {e}")))?,
            ),
            None => AllowOrigin::from(Any),
        };

        Ok(CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::POST, Method::OPTIONS])
            .allow_headers(Any))
    }

    /// Build the router with all layers
    ///
    /// # Errors
    ///
    /// Returns `ServerError::ConfigError` if the allowed origin is not a valid header value
    pub fn build_router(&self) -> Result<Router, ServerError> {
        let mut router = create_router().layer(self.cors_layer()?);

        if self.config.enable_request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        Ok(router)
    }

    /// Serve until `shutdown_signal` resolves, then drain in-flight requests
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let router = self.build_router()?;
        let addr = self.config.bind_address;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(format!("{addr}: {e}")))?;

        tracing::info!(
            addr = %addr,
            origin = self.config.allowed_origin.as_deref().unwrap_or("*"),
            "Webhook relay listening"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::ServeError(e.to_string()))?;

        tracing::info!("Webhook relay shutdown complete");
        Ok(())
    }

    pub fn info(&self) -> ServerInfo {
        ServerInfo {
            bind_address: self.config.bind_address,
            allowed_origin: self.config.allowed_origin.clone(),
            request_logging_enabled: self.config.enable_request_logging,
        }
    }
}

/// Server information
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub bind_address: SocketAddr,
    pub allowed_origin: Option<String>,
    pub request_logging_enabled: bool,
}

impl ServerInfo {
    /// Format as display string
    pub fn display(&self) -> String {
        format!(
            "Webhook Relay\n\
             {:-<40}\n\
             Bind Address: {}\n\
             Allowed Origin: {}\n\
             Request Logging: {}",
            "",
            self.bind_address,
            self.allowed_origin.as_deref().unwrap_or("*"),
            if self.request_logging_enabled {
                "enabled"
            } else {
                "disabled"
            }
        )
    }
}

/// Server errors
#[derive(Debug, Clone)]
pub enum ServerError {
    /// Configuration error
    ConfigError(String),

    /// Failed to bind to address
    BindError(String),

    /// Server error
    ServeError(String),
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            Self::BindError(msg) => write!(f, "Failed to bind: {msg}"),
            Self::ServeError(msg) => write!(f, "Server error: {msg}"),
        }
    }
}

impl std::error::Error for ServerError {}
