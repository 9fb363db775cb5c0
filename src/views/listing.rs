//! Catalog listing view: remote pagination, debounced search, favorite flags

use serde::Serialize;
use std::sync::Arc;

use crate::catalog::CatalogApi;
use crate::favorites::{Favorites, FavoritesStore};
use crate::models::CatalogItem;
use crate::pagination::{Coordinator, CoordinatorSnapshot, SearchSettings};
use crate::utils::error::{FetchError, StoreError};

/// One rendered row of the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub is_favorite: bool,
}

pub struct ListView<C: ?Sized, S: ?Sized> {
    coordinator: Coordinator<C>,
    favorites: Favorites<S>,
}

impl<C, S> ListView<C, S>
where
    C: CatalogApi + ?Sized + 'static,
    S: FavoritesStore + ?Sized,
{
    pub fn new(catalog: Arc<C>, favorites: Favorites<S>, settings: SearchSettings) -> Self {
        Self {
            coordinator: Coordinator::remote(catalog, settings),
            favorites,
        }
    }

    pub fn coordinator(&self) -> &Coordinator<C> {
        &self.coordinator
    }

    /// Load the current page
    pub async fn load(&self) -> Result<(), FetchError> {
        self.coordinator.load_page().await
    }

    pub async fn next_page(&self) -> Result<bool, FetchError> {
        self.coordinator.next_page().await
    }

    pub async fn prev_page(&self) -> Result<bool, FetchError> {
        self.coordinator.prev_page().await
    }

    pub async fn go_to_page(&self, page: usize) -> Result<(), FetchError> {
        self.coordinator.go_to_page(page).await
    }

    pub async fn on_search_change(&self, term: &str) {
        self.coordinator.on_search_change(term).await;
    }

    pub async fn snapshot(&self) -> CoordinatorSnapshot {
        self.coordinator.snapshot().await
    }

    /// Visible items (search results while searching) with their favorite flags
    pub async fn rows(&self) -> Result<Vec<ListRow>, StoreError> {
        let snapshot = self.coordinator.snapshot().await;
        let favorite_ids = self.favorites.list()?;

        Ok(snapshot
            .visible()
            .iter()
            .map(|item| ListRow {
                is_favorite: favorite_ids.contains(&item.id),
                item: item.clone(),
            })
            .collect())
    }

    pub fn is_favorite(&self, id: u32) -> Result<bool, StoreError> {
        self.favorites.contains(id)
    }

    /// Flip the favorite flag of `id`; returns the new state
    pub fn toggle_favorite(&self, id: u32) -> Result<bool, StoreError> {
        self.favorites.toggle(id)
    }
}
