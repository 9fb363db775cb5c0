//! Favorites view
//!
//! Loads the details of every favorite concurrently, keeps them sorted by id
//! and pages/searches through them in memory.

use futures::future::join_all;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::catalog::{CatalogApi, CatalogKey};
use crate::favorites::{Favorites, FavoritesStore};
use crate::models::CatalogItem;
use crate::pagination::{Coordinator, CoordinatorSnapshot, PageWindow, SearchSettings};
use crate::utils::error::StoreError;

/// Outcome of a favorites load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Details fetched successfully
    pub loaded: usize,
    /// Ids whose details could not be fetched
    pub failed: Vec<u32>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct FavoritesView<C: ?Sized, S: ?Sized> {
    catalog: Arc<C>,
    favorites: Favorites<S>,
    coordinator: Coordinator<C>,
    loading: AtomicBool,
}

impl<C, S> FavoritesView<C, S>
where
    C: CatalogApi + ?Sized + 'static,
    S: FavoritesStore + ?Sized,
{
    pub fn new(catalog: Arc<C>, favorites: Favorites<S>, settings: SearchSettings) -> Self {
        Self {
            coordinator: Coordinator::local(Arc::clone(&catalog), settings, Vec::new()),
            catalog,
            favorites,
            loading: AtomicBool::new(false),
        }
    }

    pub fn coordinator(&self) -> &Coordinator<C> {
        &self.coordinator
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// (Re)load every favorite's details
    ///
    /// All lookups run concurrently and are joined before the collection is
    /// replaced. Items that fail to load are left out and listed in the
    /// report. No catalog call is made when there are no favorites.
    ///
    /// # Errors
    ///
    /// Returns the store error if the favorite ids cannot be read.
    pub async fn load(&self) -> Result<LoadReport, StoreError> {
        self.loading.store(true, Ordering::SeqCst);
        let result = self.load_inner().await;
        self.loading.store(false, Ordering::SeqCst);
        result
    }

    async fn load_inner(&self) -> Result<LoadReport, StoreError> {
        let ids = self.favorites.list()?;
        if ids.is_empty() {
            self.coordinator.set_collection(Vec::new()).await;
            return Ok(LoadReport::default());
        }

        let catalog = &self.catalog;
        let lookups = ids.iter().map(|&id| async move {
            (id, catalog.get_pokemon(&CatalogKey::Id(id)).await)
        });

        let sprite_base = &self.coordinator.settings().sprite_base_url;
        let mut items: Vec<CatalogItem> = Vec::with_capacity(ids.len());
        let mut failed = Vec::new();

        for (id, result) in join_all(lookups).await {
            match result {
                Ok(pokemon) => items.push(pokemon.to_item(sprite_base)),
                Err(e) => {
                    tracing::warn!(pokemon_id = id, error = %e, "Failed to load favorite");
                    failed.push(id);
                }
            }
        }

        items.sort_by_key(|item| item.id);

        let report = LoadReport {
            loaded: items.len(),
            failed,
        };
        tracing::debug!(loaded = report.loaded, failed = report.failed.len(), "Favorites loaded");

        self.coordinator.set_collection(items).await;
        Ok(report)
    }

    /// Loaded favorites, ascending by id
    pub async fn items(&self) -> Vec<CatalogItem> {
        self.coordinator.collection().await.unwrap_or_default()
    }

    pub async fn window(&self) -> PageWindow {
        self.coordinator.window().await
    }

    pub async fn snapshot(&self) -> CoordinatorSnapshot {
        self.coordinator.snapshot().await
    }

    pub async fn next_page(&self) -> bool {
        // Local mode never touches the catalog
        self.coordinator.next_page().await.unwrap_or(false)
    }

    pub async fn prev_page(&self) -> bool {
        self.coordinator.prev_page().await.unwrap_or(false)
    }

    pub async fn on_search_change(&self, term: &str) {
        self.coordinator.on_search_change(term).await;
    }

    pub async fn search_now(&self, term: &str) {
        self.coordinator.perform_search(term).await;
    }

    /// Remove one favorite from the store and from the loaded collection
    pub async fn remove(&self, id: u32) -> Result<bool, StoreError> {
        let removed = self.favorites.remove(id)?;
        self.coordinator.remove_from_collection(id).await;
        Ok(removed)
    }

    /// Empty the store and the view; pagination goes back to offset 0, total 0
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.favorites.clear()?;
        self.coordinator.clear_search().await;
        self.coordinator.set_collection(Vec::new()).await;
        Ok(())
    }
}
