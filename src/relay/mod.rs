//! Webhook relay
//!
//! A standalone HTTP endpoint that accepts favorites events on
//! `POST /webhook`, logs them and answers 200. It keeps no state.

pub mod api;
pub mod config;
pub mod server;

pub use api::{create_router, WebhookAck};
pub use config::{ConfigError, RelayConfig, RelayConfigBuilder};
pub use server::{RelayServer, ServerError, ServerInfo};
