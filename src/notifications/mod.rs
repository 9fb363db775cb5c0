//! Outbound favorites events
//!
//! Adding, removing or clearing favorites can emit a [`FavoriteEvent`] to a
//! configured relay through the [`webhook`] channel.

pub mod webhook;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub use webhook::{NotifyError, WebhookConfig, WebhookNotifier};

pub const EVENT_ADDED: &str = "favorite_added";
pub const EVENT_REMOVED: &str = "favorite_removed";
pub const EVENT_CLEARED: &str = "favorites_cleared";

/// Wire payload: `{"event": ..., "pokemonId"?: ..., "timestamp": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEvent {
    pub event: String,

    #[serde(
        rename = "pokemonId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pokemon_id: Option<u32>,

    /// RFC 3339, millisecond precision, UTC
    pub timestamp: String,
}

impl FavoriteEvent {
    fn new(event: &str, pokemon_id: Option<u32>, at: DateTime<Utc>) -> Self {
        Self {
            event: event.to_string(),
            pokemon_id,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn added(id: u32) -> Self {
        Self::new(EVENT_ADDED, Some(id), Utc::now())
    }

    pub fn removed(id: u32) -> Self {
        Self::new(EVENT_REMOVED, Some(id), Utc::now())
    }

    pub fn cleared() -> Self {
        Self::new(EVENT_CLEARED, None, Utc::now())
    }
}
