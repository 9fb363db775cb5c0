//! Webhook delivery of favorites events
//!
//! Events are POSTed as JSON to a single relay endpoint. Delivery is best
//! effort: one attempt, no retry, failures are logged and never reach the
//! caller of [`WebhookNotifier::publish`].

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;

use super::FavoriteEvent;
use crate::config::NotificationsConfig;

/// Errors from a single delivery attempt
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Invalid webhook config: {0}")]
    InvalidConfig(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Relay rejected event with HTTP {0}")]
    Rejected(u16),
}

/// Webhook endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Relay URL receiving the events
    pub url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    5
}

impl WebhookConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: default_timeout(),
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Webhook settings from the notifications section, `None` when disabled
    pub fn from_settings(settings: &NotificationsConfig) -> Option<Self> {
        settings
            .webhook_url
            .as_ref()
            .map(|url| Self::new(url.clone()).with_timeout(settings.timeout_secs))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Webhook URL cannot be empty".to_string());
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err("Webhook URL must start with http:// or https://".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Posts [`FavoriteEvent`]s to the relay
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    config: WebhookConfig,
    client: Client,
    /// Deliveries spawned by `publish` and not yet awaited
    in_flight: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl WebhookNotifier {
    /// # Errors
    ///
    /// Returns `NotifyError::InvalidConfig` for a bad URL or zero timeout.
    pub fn new(config: WebhookConfig) -> Result<Self, NotifyError> {
        config.validate().map_err(NotifyError::InvalidConfig)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            client,
            in_flight: Arc::default(),
        })
    }

    pub fn from_url(url: impl Into<String>) -> Result<Self, NotifyError> {
        Self::new(WebhookConfig::new(url))
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Send one event and wait for the relay's answer
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Http` on transport failure and
    /// `NotifyError::Rejected` on a non-2xx status.
    pub async fn deliver(&self, event: &FavoriteEvent) -> Result<(), NotifyError> {
        let response = self.client.post(&self.config.url).json(event).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(status.as_u16()));
        }

        tracing::debug!(url = %self.config.url, event = %event.event, "Event delivered");
        Ok(())
    }

    /// Fire-and-forget delivery
    ///
    /// Spawns the request on the current tokio runtime. Outside a runtime the
    /// event is dropped with a debug log.
    pub fn publish(&self, event: FavoriteEvent) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(event = %event.event, "No runtime, event not sent");
            return;
        };

        let notifier = self.clone();
        let task = handle.spawn(async move {
            if let Err(e) = notifier.deliver(&event).await {
                tracing::warn!(
                    url = %notifier.config.url,
                    event = %event.event,
                    error = %e,
                    "Failed to deliver favorites event"
                );
            }
        });

        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        in_flight.retain(|task| !task.is_finished());
        in_flight.push(task);
    }

    /// Wait for every published event to be delivered or to fail
    ///
    /// Short-lived processes call this before exiting so pending deliveries
    /// are not dropped with the runtime.
    pub async fn flush(&self) {
        let pending: Vec<JoinHandle<()>> = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();

        for task in pending {
            if let Err(e) = task.await {
                tracing::debug!(error = %e, "Event delivery task ended abnormally");
            }
        }
    }
}
