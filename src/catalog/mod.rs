//! Remote catalog access
//!
//! The catalog exposes three read-only operations: a paged listing, a single
//! item by name or id, and species metadata by name or id. Each is a
//! single-shot request with no automatic retry; callers treat every failure the
//! same way regardless of its cause.

pub mod client;

use async_trait::async_trait;
use std::fmt;

use crate::models::{ListPage, Pokemon, Species};
use crate::utils::error::FetchError;

pub use client::CatalogClient;

/// Lookup key accepted by the item and species endpoints
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogKey {
    Id(u32),
    Name(String),
}

impl CatalogKey {
    /// Interpret user input: all-digit input is an id, anything else a lowercase name
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.parse::<u32>() {
            Ok(id) if crate::utils::is_numeric_term(trimmed) => Self::Id(id),
            _ => Self::Name(trimmed.to_lowercase()),
        }
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<u32> for CatalogKey {
    fn from(id: u32) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for CatalogKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

/// Read-only access to the remote catalog
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch `limit` listing entries starting at `offset`
    async fn list_page(&self, offset: usize, limit: usize) -> Result<ListPage, FetchError>;

    /// Fetch the full item record for a name or id
    async fn get_pokemon(&self, key: &CatalogKey) -> Result<Pokemon, FetchError>;

    /// Fetch species metadata for a name or id
    async fn get_species(&self, key: &CatalogKey) -> Result<Species, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parse() {
        assert_eq!(CatalogKey::parse("25"), CatalogKey::Id(25));
        assert_eq!(
            CatalogKey::parse(" Pikachu "),
            CatalogKey::Name("pikachu".to_string())
        );
        assert_eq!(
            CatalogKey::parse("99999999999"),
            CatalogKey::Name("99999999999".to_string())
        );
    }

    #[test]
    fn test_key_display() {
        assert_eq!(CatalogKey::Id(7).to_string(), "7");
        assert_eq!(CatalogKey::from("mew").to_string(), "mew");
    }
}
