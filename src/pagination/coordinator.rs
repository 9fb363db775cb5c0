//! Pagination and incremental search coordinator
//!
//! A [`Coordinator`] owns the page window and the search state of one view.
//! It runs in one of two modes:
//!
//! - **remote**: every page is fetched from the catalog, searches go to the
//!   catalog (exact lookup first, then a partial-name scan of the listing)
//! - **local**: the whole collection is already loaded; pages are slices of it
//!   and searches are in-memory
//!
//! Typed terms go through a [`Debouncer`]; only the last distinct term seen
//! after the quiet period is searched. Every search takes a sequence number
//! and only the newest one may write its results, so a slow response can
//! never overwrite a newer one.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::catalog::{CatalogApi, CatalogKey};
use crate::config::{Config, DEFAULT_SPRITE_URL};
use crate::models::CatalogItem;
use crate::utils::error::FetchError;
use crate::utils::normalize_term;

use super::debounce::Debouncer;
use super::search::{match_listing, search_local, SearchQuery, SearchState};
use super::window::PageWindow;

/// Tuning for a coordinator instance
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub page_size: usize,
    pub debounce: Duration,
    pub fallback_scan_limit: usize,
    pub fallback_result_cap: usize,
    pub sprite_base_url: String,
}

impl SearchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            page_size: config.pagination.page_size,
            debounce: config.debounce(),
            fallback_scan_limit: config.pagination.fallback_scan_limit,
            fallback_result_cap: config.pagination.fallback_result_cap,
            sprite_base_url: config.catalog.sprite_base_url.clone(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            page_size: 20,
            debounce: Duration::from_millis(300),
            fallback_scan_limit: 1000,
            fallback_result_cap: 20,
            sprite_base_url: DEFAULT_SPRITE_URL.to_string(),
        }
    }
}

/// Point-in-time copy of a coordinator's state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinatorSnapshot {
    pub window: PageWindow,
    pub search: SearchState,
    pub page: Vec<CatalogItem>,
}

impl CoordinatorSnapshot {
    /// What a view should render: search results while a term is set, the page otherwise
    pub fn visible(&self) -> &[CatalogItem] {
        if self.search.is_active() {
            &self.search.results
        } else {
            &self.page
        }
    }
}

#[derive(Debug)]
enum Backing {
    Remote,
    Local(Arc<Vec<CatalogItem>>),
}

#[derive(Debug)]
struct State {
    window: PageWindow,
    search: SearchState,
    page: Vec<CatalogItem>,
    backing: Backing,
    /// Term whose results are currently in `search.results`
    displayed_term: Option<String>,
}

impl State {
    fn reslice(&mut self) {
        if let Backing::Local(items) = &self.backing {
            self.page = self.window.slice(items).to_vec();
        }
    }
}

struct Shared<C: ?Sized> {
    catalog: Arc<C>,
    settings: SearchSettings,
    state: RwLock<State>,
    debouncer: Debouncer,
    search_seq: AtomicU64,
    page_seq: AtomicU64,
}

/// Pagination + search state machine for one view
pub struct Coordinator<C: ?Sized> {
    shared: Arc<Shared<C>>,
}

impl<C: ?Sized> Clone for Coordinator<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<C> Coordinator<C>
where
    C: CatalogApi + ?Sized + 'static,
{
    /// Coordinator that fetches every page from the catalog
    pub fn remote(catalog: Arc<C>, settings: SearchSettings) -> Self {
        Self::with_backing(catalog, settings, Backing::Remote)
    }

    /// Coordinator over an already-loaded collection
    pub fn local(catalog: Arc<C>, settings: SearchSettings, items: Vec<CatalogItem>) -> Self {
        Self::with_backing(catalog, settings, Backing::Local(Arc::new(items)))
    }

    fn with_backing(catalog: Arc<C>, settings: SearchSettings, backing: Backing) -> Self {
        let mut state = State {
            window: PageWindow::new(settings.page_size),
            search: SearchState::default(),
            page: Vec::new(),
            backing,
            displayed_term: None,
        };
        if let Backing::Local(items) = &state.backing {
            state.window.set_total(items.len());
        }
        state.reslice();

        Self {
            shared: Arc::new(Shared {
                catalog,
                debouncer: Debouncer::new(settings.debounce),
                settings,
                state: RwLock::new(state),
                search_seq: AtomicU64::new(0),
                page_seq: AtomicU64::new(0),
            }),
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.shared.settings
    }

    pub async fn window(&self) -> PageWindow {
        self.shared.state.read().await.window
    }

    pub async fn search_state(&self) -> SearchState {
        self.shared.state.read().await.search.clone()
    }

    pub async fn page_items(&self) -> Vec<CatalogItem> {
        self.shared.state.read().await.page.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.shared.state.read().await.search.is_loading
    }

    /// The loaded collection in local mode, `None` in remote mode
    pub async fn collection(&self) -> Option<Vec<CatalogItem>> {
        match &self.shared.state.read().await.backing {
            Backing::Local(items) => Some(items.as_ref().clone()),
            Backing::Remote => None,
        }
    }

    pub async fn snapshot(&self) -> CoordinatorSnapshot {
        let state = self.shared.state.read().await;
        CoordinatorSnapshot {
            window: state.window,
            search: state.search.clone(),
            page: state.page.clone(),
        }
    }

    /// Whether a typed term is still waiting out the debounce window
    pub fn is_search_pending(&self) -> bool {
        self.shared.debouncer.is_pending()
    }

    // ------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------

    /// Reload the current page window
    ///
    /// In remote mode this fetches `[offset, offset + limit)` from the catalog
    /// and records the catalog's total. In local mode it re-slices the
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns the catalog error in remote mode; the window is left as it was.
    pub async fn load_page(&self) -> Result<(), FetchError> {
        let (offset, limit) = {
            let mut state = self.shared.state.write().await;
            if matches!(state.backing, Backing::Local(_)) {
                state.reslice();
                return Ok(());
            }
            (state.window.offset(), state.window.limit())
        };

        let seq = self.shared.page_seq.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::debug!(offset, limit, "Loading catalog page");
        let page = self.shared.catalog.list_page(offset, limit).await?;

        let mut state = self.shared.state.write().await;
        if self.shared.page_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(offset, "Discarding stale page response");
            return Ok(());
        }

        state.window.set_total(page.count);
        state.page = page.to_items(offset, &self.shared.settings.sprite_base_url);
        Ok(())
    }

    /// Advance one page and reload; `Ok(false)` when already on the last page
    ///
    /// # Errors
    ///
    /// Returns the catalog error if the new page cannot be fetched.
    pub async fn next_page(&self) -> Result<bool, FetchError> {
        let moved = self.shared.state.write().await.window.advance();
        if moved {
            self.load_page().await?;
        }
        Ok(moved)
    }

    /// Go back one page and reload; `Ok(false)` when already on the first page
    ///
    /// # Errors
    ///
    /// Returns the catalog error if the new page cannot be fetched.
    pub async fn prev_page(&self) -> Result<bool, FetchError> {
        let moved = self.shared.state.write().await.window.retreat();
        if moved {
            self.load_page().await?;
        }
        Ok(moved)
    }

    /// Jump to a 1-based page and reload
    ///
    /// # Errors
    ///
    /// Returns the catalog error if the page cannot be fetched.
    pub async fn go_to_page(&self, page: usize) -> Result<(), FetchError> {
        self.shared.state.write().await.window.go_to_page(page);
        self.load_page().await
    }

    /// Replace the local collection (switching to local mode) and re-slice
    ///
    /// An active, settled search is re-run against the new collection.
    pub async fn set_collection(&self, items: Vec<CatalogItem>) {
        let mut state = self.shared.state.write().await;
        state.window.set_total(items.len());
        state.backing = Backing::Local(Arc::new(items));
        state.reslice();

        if state.search.is_active() && !state.search.is_loading {
            if let (Some(query), Backing::Local(items)) =
                (SearchQuery::parse(&state.search.term), &state.backing)
            {
                state.search.results = search_local(items, &query);
            }
        }
    }

    /// Remove one id from the local collection; false if it was not there
    pub async fn remove_from_collection(&self, id: u32) -> bool {
        let remaining = {
            let state = self.shared.state.read().await;
            match &state.backing {
                Backing::Local(items) if items.iter().any(|item| item.id == id) => items
                    .iter()
                    .filter(|item| item.id != id)
                    .cloned()
                    .collect::<Vec<_>>(),
                _ => return false,
            }
        };

        self.set_collection(remaining).await;
        true
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Handle a change of the search input
    ///
    /// An empty (after trimming) term clears the search right away. Anything
    /// else marks the search as loading and (re)starts the debounce timer;
    /// repeating the current term is ignored.
    pub async fn on_search_change(&self, raw: &str) {
        let term = normalize_term(raw);
        let mut state = self.shared.state.write().await;

        if term.is_empty() {
            self.shared.debouncer.cancel();
            self.shared.search_seq.fetch_add(1, Ordering::SeqCst);
            state.search.clear();
            state.displayed_term = None;
            return;
        }

        if term == state.search.term {
            tracing::trace!(term = %term, "Ignoring repeated search term");
            return;
        }

        state.search.term = term.clone();
        state.search.is_loading = true;
        // Whatever is in flight now answers an outdated term
        self.shared.search_seq.fetch_add(1, Ordering::SeqCst);
        drop(state);

        let this = self.clone();
        self.shared
            .debouncer
            .schedule(async move { this.fire(term).await });
    }

    /// Debounce timer expiry for `term`
    async fn fire(&self, term: String) {
        {
            let mut state = self.shared.state.write().await;
            if state.search.term != term {
                return;
            }
            if state.displayed_term.as_deref() == Some(term.as_str()) {
                tracing::trace!(term = %term, "Results already shown, skipping search");
                state.search.is_loading = false;
                return;
            }
        }

        self.perform_search(&term).await;
    }

    /// Run a search immediately, bypassing the debounce timer
    ///
    /// Never fails: catalog errors collapse into an empty result set. The
    /// loading flag is cleared once the outcome is known, unless a newer
    /// search or a clear has superseded this one.
    pub async fn perform_search(&self, raw: &str) {
        let Some(query) = SearchQuery::parse(raw) else {
            self.clear_search().await;
            return;
        };
        let term = normalize_term(raw);

        let seq = self.shared.search_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let local = {
            let mut state = self.shared.state.write().await;
            state.search.term = term.clone();
            state.search.is_loading = true;
            match &state.backing {
                Backing::Local(items) => Some(Arc::clone(items)),
                Backing::Remote => None,
            }
        };

        tracing::debug!(term = %term, query = ?query, local = local.is_some(), "Performing search");

        let results = match local {
            Some(items) => search_local(&items, &query),
            None => self.search_remote(&query).await,
        };

        let mut state = self.shared.state.write().await;
        if self.shared.search_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(term = %term, "Discarding stale search results");
            return;
        }

        tracing::debug!(term = %term, count = results.len(), "Search finished");
        state.search.results = results;
        state.search.is_loading = false;
        state.displayed_term = Some(term);
    }

    /// Reset term, results and loading flag; idempotent
    pub async fn clear_search(&self) {
        self.shared.debouncer.cancel();
        self.shared.search_seq.fetch_add(1, Ordering::SeqCst);

        let mut state = self.shared.state.write().await;
        state.search.clear();
        state.displayed_term = None;
    }

    async fn search_remote(&self, query: &SearchQuery) -> Vec<CatalogItem> {
        let catalog = &self.shared.catalog;
        let sprite_base = &self.shared.settings.sprite_base_url;

        match query {
            SearchQuery::Id(raw_id) => {
                let Some(id) = query.catalog_id() else {
                    tracing::debug!(id = raw_id, "Id out of catalog range");
                    return Vec::new();
                };
                match catalog.get_pokemon(&CatalogKey::Id(id)).await {
                    Ok(pokemon) => vec![pokemon.to_item(sprite_base)],
                    Err(e) => {
                        tracing::debug!(id, error = %e, "Id lookup failed");
                        Vec::new()
                    }
                }
            }
            SearchQuery::Name(name) => {
                match catalog.get_pokemon(&CatalogKey::Name(name.clone())).await {
                    Ok(pokemon) => vec![pokemon.to_item(sprite_base)],
                    Err(e) => {
                        tracing::debug!(name = %name, error = %e, "Exact lookup failed, scanning listing");
                        self.search_partial(name).await
                    }
                }
            }
        }
    }

    async fn search_partial(&self, name: &str) -> Vec<CatalogItem> {
        let settings = &self.shared.settings;

        match self
            .shared
            .catalog
            .list_page(0, settings.fallback_scan_limit)
            .await
        {
            Ok(page) => match_listing(
                &page.results,
                name,
                settings.fallback_result_cap,
                &settings.sprite_base_url,
            ),
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "Partial-name scan failed");
                Vec::new()
            }
        }
    }
}
