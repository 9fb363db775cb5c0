use anyhow::{Context, Result};
use std::sync::Arc;

use pokedex::catalog::CatalogClient;
use pokedex::config::Config;
use pokedex::favorites::{Favorites, JsonFileStore};
use pokedex::models::CatalogItem;
use pokedex::notifications::{WebhookConfig, WebhookNotifier};
use pokedex::pagination::SearchSettings;
use pokedex::utils::display_name;

pub mod browse;
pub mod favorites;
pub mod relay;
pub mod search;
pub mod show;

pub use browse::browse;
pub use favorites::{favorites, FavoritesAction};
pub use relay::relay;
pub use search::search;
pub use show::show;

/// Shared handles built once from the configuration
pub struct App {
    pub config: Config,
    pub catalog: Arc<CatalogClient>,
    pub favorites: Favorites<JsonFileStore>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let catalog = Arc::new(
            CatalogClient::from_config(&config.catalog)
                .context("Failed to create catalog client")?,
        );

        let store = Arc::new(JsonFileStore::new(&config.favorites.path));
        let mut favorites = Favorites::new(store);
        if let Some(webhook) = WebhookConfig::from_settings(&config.notifications) {
            let notifier =
                WebhookNotifier::new(webhook).context("Invalid notifications webhook")?;
            favorites = favorites.with_notifier(notifier);
        }

        Ok(Self {
            config,
            catalog,
            favorites,
        })
    }

    pub fn settings(&self) -> SearchSettings {
        SearchSettings::from_config(&self.config)
    }
}

/// Print one line per item, starring favorites
pub fn print_items(items: &[CatalogItem], favorite_ids: &[u32]) {
    for item in items {
        let star = if favorite_ids.contains(&item.id) { "*" } else { " " };
        println!(
            "  {star} #{:<5} {:<24} {}",
            item.id,
            display_name(&item.name),
            item.image
        );
    }
}
