//! Search term dispatch and in-memory matching
//!
//! A trimmed term made only of decimal digits is an id lookup, anything else
//! is a name lookup. Name lookups prefer exact (case-insensitive) matches and
//! fall back to substring containment.

use serde::Serialize;

use crate::models::{CatalogItem, NamedResource};
use crate::utils::{is_numeric_term, normalize_term, sprite_url};

/// Term, loading flag and results of the current search
///
/// When `term` is empty, `results` is empty and `is_loading` is false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchState {
    pub term: String,
    pub is_loading: bool,
    pub results: Vec<CatalogItem>,
}

impl SearchState {
    /// Whether a non-empty term is in effect
    pub fn is_active(&self) -> bool {
        !self.term.is_empty()
    }

    pub fn clear(&mut self) {
        self.term.clear();
        self.is_loading = false;
        self.results.clear();
    }
}

/// A search term classified for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// All-digit term; `u64` so oversized inputs still take the id path
    Id(u64),
    /// Anything else, lowercased
    Name(String),
}

impl SearchQuery {
    /// Classify a raw term; `None` when it is empty after trimming
    pub fn parse(raw: &str) -> Option<Self> {
        let term = normalize_term(raw);
        if term.is_empty() {
            return None;
        }

        if is_numeric_term(&term) {
            // Longer than u64 can hold: no catalog id can match
            Some(Self::Id(term.parse().unwrap_or(u64::MAX)))
        } else {
            Some(Self::Name(term.to_lowercase()))
        }
    }

    /// The id as the catalog's key type, if it fits
    pub fn catalog_id(&self) -> Option<u32> {
        match self {
            Self::Id(id) => u32::try_from(*id).ok(),
            Self::Name(_) => None,
        }
    }
}

/// Search an already-loaded collection
pub fn search_local(items: &[CatalogItem], query: &SearchQuery) -> Vec<CatalogItem> {
    match query {
        SearchQuery::Id(id) => items
            .iter()
            .find(|item| u64::from(item.id) == *id)
            .cloned()
            .into_iter()
            .collect(),
        SearchQuery::Name(name) => {
            let exact: Vec<CatalogItem> = items
                .iter()
                .filter(|item| item.name.to_lowercase() == *name)
                .cloned()
                .collect();
            if !exact.is_empty() {
                return exact;
            }

            items
                .iter()
                .filter(|item| item.name.to_lowercase().contains(name.as_str()))
                .cloned()
                .collect()
        }
    }
}

/// Partial-name matches among raw listing entries
///
/// Keeps at most `cap` entries containing `needle` (case-insensitive), in
/// listing order, with ids parsed from their resource URLs. Entries whose URL
/// carries no id are skipped.
pub fn match_listing(
    entries: &[NamedResource],
    needle: &str,
    cap: usize,
    sprite_base: &str,
) -> Vec<CatalogItem> {
    let needle = needle.to_lowercase();

    entries
        .iter()
        .filter(|entry| entry.name.to_lowercase().contains(&needle))
        .filter_map(|entry| match entry.id() {
            Some(id) => Some(CatalogItem::new(id, &entry.name, sprite_url(sprite_base, id))),
            None => {
                tracing::debug!(name = %entry.name, url = %entry.url, "Listing entry without id");
                None
            }
        })
        .take(cap)
        .collect()
}
