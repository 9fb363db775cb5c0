//! HTTP client for the remote catalog
//!
//! This module provides the reqwest-backed implementation of [`CatalogApi`]:
//! - JSON payloads are decoded into typed records at this boundary
//! - 404 responses become `FetchError::NotFound`
//! - Timeouts are reported as `FetchError::Timeout`
//! - No retries; every call is a single request

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
    Client, StatusCode,
};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{CatalogApi, CatalogKey};
use crate::config::{CatalogConfig, DEFAULT_API_URL};
use crate::models::{ListPage, Pokemon, Species};
use crate::utils::error::FetchError;

/// Catalog client speaking the PokéAPI REST dialect
#[derive(Debug, Clone)]
pub struct CatalogClient {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// API root, without trailing slash
    base_url: String,
}

impl CatalogClient {
    /// Create a client for the public catalog with default settings
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(DEFAULT_API_URL, Duration::from_secs(30))
    }

    /// Create a client against a custom API root, e.g. a mock server
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        Self::build(
            base_url,
            timeout,
            &format!("pokedex/{}", env!("CARGO_PKG_VERSION")),
        )
    }

    /// Create a client from the catalog section of the configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn from_config(config: &CatalogConfig) -> Result<Self, FetchError> {
        Self::build(
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
            &config.user_agent,
        )
    }

    fn build(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .default_headers(Self::build_headers(user_agent))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// API root this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_headers(user_agent: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Ok(agent) = HeaderValue::from_str(user_agent) {
            headers.insert(USER_AGENT, agent);
        }

        headers
    }

    /// Issue a GET and decode the JSON body
    ///
    /// `resource` names what is being fetched, for the not-found error.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        resource: &str,
    ) -> Result<T, FetchError> {
        let url = format!("{}{path}", self.base_url);

        tracing::debug!(url = %url, "Fetching catalog resource");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else if e.is_builder() {
                    FetchError::InvalidUrl(url.clone())
                } else {
                    FetchError::Http(e)
                }
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(resource.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::ServerError(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Http(e)
            }
        })?;

        serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list_page(&self, offset: usize, limit: usize) -> Result<ListPage, FetchError> {
        self.get_json(
            "/pokemon",
            &[("offset", offset.to_string()), ("limit", limit.to_string())],
            "pokemon listing",
        )
        .await
    }

    async fn get_pokemon(&self, key: &CatalogKey) -> Result<Pokemon, FetchError> {
        let key = key.to_string();
        self.get_json(&format!("/pokemon/{key}"), &[], &key).await
    }

    async fn get_species(&self, key: &CatalogKey) -> Result<Species, FetchError> {
        let key = key.to_string();
        self.get_json(&format!("/pokemon-species/{key}"), &[], &key)
            .await
    }
}
