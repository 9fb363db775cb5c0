//! pokedex - Pokémon catalog browser
//!
//! Browses the public PokéAPI catalog page by page, looks items up by id or
//! name with a debounced incremental search, and keeps a local list of
//! favorites that can be mirrored to a webhook relay.
//!
//! # Architecture
//!
//! - [`config`] - Configuration from TOML files and environment variables
//! - [`catalog`] - Remote catalog client (`CatalogApi` trait + reqwest client)
//! - [`models`] - Catalog records and summaries
//! - [`pagination`] - Page window, debouncer and the search coordinator
//! - [`favorites`] - Persisted favorite ids
//! - [`notifications`] - Favorites events and webhook delivery
//! - [`relay`] - Standalone webhook relay server
//! - [`views`] - Listing, detail and favorites view models
//! - [`utils`] - Shared helpers and leaf error types
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pokedex::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let catalog = Arc::new(CatalogClient::from_config(&config.catalog)?);
//!     let coordinator = Coordinator::remote(catalog, SearchSettings::from_config(&config));
//!
//!     coordinator.load_page().await?;
//!     coordinator.perform_search("pikachu").await;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod models;
pub mod notifications;
pub mod pagination;
pub mod relay;
pub mod utils;
pub mod views;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog::{CatalogApi, CatalogClient, CatalogKey};
    pub use crate::config::Config;
    pub use crate::error::{find_in_chain, ErrorCategory, PokedexErrorTrait};
    pub use crate::favorites::{Favorites, FavoritesStore, JsonFileStore};
    pub use crate::models::{CatalogItem, Pokemon, Species};
    pub use crate::pagination::{Coordinator, PageWindow, SearchSettings, SearchState};
    pub use crate::views::{DetailView, FavoritesView, ListView};
}

pub use models::CatalogItem;
