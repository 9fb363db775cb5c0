//! Favorites: a persisted, insertion-ordered set of catalog ids
//!
//! [`FavoritesStore`] is the storage seam. [`Favorites`] wraps a store and
//! publishes a [`FavoriteEvent`] whenever the set actually changes.

pub mod file;

use std::sync::{Arc, Mutex, PoisonError};

use crate::notifications::{FavoriteEvent, WebhookNotifier};
use crate::utils::error::StoreError;

pub use file::JsonFileStore;

/// Storage for the favorite set
///
/// Implementations keep insertion order and never store an id twice. No
/// in-memory cache: every call sees the current persisted state.
pub trait FavoritesStore: Send + Sync {
    /// Ids in insertion order
    fn list(&self) -> Result<Vec<u32>, StoreError>;

    fn contains(&self, id: u32) -> Result<bool, StoreError> {
        Ok(self.list()?.contains(&id))
    }

    /// Append `id`; `Ok(false)` if it was already present
    fn add(&self, id: u32) -> Result<bool, StoreError>;

    /// Remove `id`; `Ok(false)` if it was absent
    fn remove(&self, id: u32) -> Result<bool, StoreError>;

    fn clear(&self) -> Result<(), StoreError>;
}

/// Volatile store, mostly for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    ids: Mutex<Vec<u32>>,
}

impl MemoryStore {
    pub fn with_ids(ids: impl IntoIterator<Item = u32>) -> Self {
        let store = Self::default();
        for id in ids {
            // Infallible for the memory backend
            let _ = store.add(id);
        }
        store
    }
}

impl FavoritesStore for MemoryStore {
    fn list(&self) -> Result<Vec<u32>, StoreError> {
        Ok(self.ids.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn add(&self, id: u32) -> Result<bool, StoreError> {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        if ids.contains(&id) {
            return Ok(false);
        }
        ids.push(id);
        Ok(true)
    }

    fn remove(&self, id: u32) -> Result<bool, StoreError> {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        let before = ids.len();
        ids.retain(|&existing| existing != id);
        Ok(ids.len() != before)
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner).clear();
        Ok(())
    }
}

/// Favorites service: store access plus event publication
pub struct Favorites<S: ?Sized> {
    store: Arc<S>,
    notifier: Option<WebhookNotifier>,
}

impl<S: ?Sized> Clone for Favorites<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            notifier: self.notifier.clone(),
        }
    }
}

impl<S: FavoritesStore + ?Sized> Favorites<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            notifier: None,
        }
    }

    /// Publish change events through `notifier`
    pub fn with_notifier(mut self, notifier: WebhookNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn list(&self) -> Result<Vec<u32>, StoreError> {
        self.store.list()
    }

    pub fn contains(&self, id: u32) -> Result<bool, StoreError> {
        self.store.contains(id)
    }

    /// Idempotent add; emits `favorite_added` only when the set changed
    pub fn add(&self, id: u32) -> Result<bool, StoreError> {
        let added = self.store.add(id)?;
        if added {
            tracing::info!(pokemon_id = id, "Favorite added");
            self.publish(FavoriteEvent::added(id));
        }
        Ok(added)
    }

    /// Idempotent remove; emits `favorite_removed` only when the set changed
    pub fn remove(&self, id: u32) -> Result<bool, StoreError> {
        let removed = self.store.remove(id)?;
        if removed {
            tracing::info!(pokemon_id = id, "Favorite removed");
            self.publish(FavoriteEvent::removed(id));
        }
        Ok(removed)
    }

    /// Add when absent, remove when present; returns the new membership
    pub fn toggle(&self, id: u32) -> Result<bool, StoreError> {
        if self.contains(id)? {
            self.remove(id)?;
            Ok(false)
        } else {
            self.add(id)?;
            Ok(true)
        }
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.clear()?;
        tracing::info!("Favorites cleared");
        self.publish(FavoriteEvent::cleared());
        Ok(())
    }

    /// Wait for outstanding event deliveries
    pub async fn flush_events(&self) {
        if let Some(notifier) = &self.notifier {
            notifier.flush().await;
        }
    }

    fn publish(&self, event: FavoriteEvent) {
        if let Some(notifier) = &self.notifier {
            notifier.publish(event);
        }
    }
}
