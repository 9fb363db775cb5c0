//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Build the sprite URL for a catalog id
///
/// Used whenever an item has no default sprite of its own, and for listing
/// entries, which never carry one.
pub fn sprite_url(base: &str, id: u32) -> String {
    format!("{}/{id}.png", base.trim_end_matches('/'))
}

/// Extract the numeric id from a catalog resource URL
///
/// The id is the last non-empty path segment, i.e. the segment right before
/// the trailing slash in `https://pokeapi.co/api/v2/pokemon/25/`.
pub fn parse_resource_id(resource_url: &str) -> Option<u32> {
    let parsed = Url::parse(resource_url).ok()?;

    parsed
        .path_segments()?
        .rev()
        .find(|segment| !segment.is_empty())?
        .parse()
        .ok()
}

/// Whether a trimmed search term is made only of ASCII decimal digits
pub fn is_numeric_term(term: &str) -> bool {
    static DIGITS_RE: OnceLock<Regex> = OnceLock::new();

    let re = DIGITS_RE.get_or_init(|| Regex::new(r"^[0-9]+$").expect("Invalid regex pattern"));

    re.is_match(term)
}

/// Normalize a raw search input: surrounding whitespace is dropped
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_string()
}

/// Capitalize the first character of a catalog name for display
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
