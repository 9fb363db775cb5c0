//! Error classification for the pokedex crate
//!
//! - [`PokedexErrorTrait`] - Common interface implemented by the leaf error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`find_in_chain`] - Recover a leaf error from a wrapped error chain
//!
//! Errors never reach the user as-is: the binary shows
//! [`PokedexErrorTrait::user_message`] as a short notice instead.

// Re-export domain-specific errors for convenience
pub use crate::utils::error::{FetchError, StoreError};

/// Common trait for all pokedex error types
pub trait PokedexErrorTrait: std::error::Error {
    /// Check if this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Short message suitable for a dismissible notice
    fn user_message(&self) -> String;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout, not found)
    Network,
    /// Local storage errors
    Storage,
    /// Payload parsing errors
    Parsing,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Storage => "storage",
            Self::Parsing => "parsing",
            Self::Config => "config",
            Self::Other => "other",
        }
    }
}

impl PokedexErrorTrait for FetchError {
    fn is_recoverable(&self) -> bool {
        self.is_transient()
    }

    fn user_message(&self) -> String {
        match self {
            Self::NotFound(key) => format!("No Pokémon found for \"{key}\""),
            Self::Timeout => "The catalog took too long to respond".to_string(),
            Self::Decode(_) => "The catalog sent an unexpected response".to_string(),
            _ => "Could not reach the Pokémon catalog".to_string(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Decode(_) => ErrorCategory::Parsing,
            Self::InvalidUrl(_) => ErrorCategory::Config,
            _ => ErrorCategory::Network,
        }
    }
}

impl PokedexErrorTrait for StoreError {
    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    fn user_message(&self) -> String {
        match self {
            Self::Io(_) => "Favorites could not be saved".to_string(),
            Self::Corrupt(_) => "Saved favorites are unreadable".to_string(),
            Self::Serialize(_) => "Favorites could not be encoded".to_string(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Io(_) => ErrorCategory::Storage,
            Self::Corrupt(_) | Self::Serialize(_) => ErrorCategory::Parsing,
        }
    }
}

/// First pokedex error in `err`'s source chain
///
/// Commands wrap leaf errors in context; this digs the leaf back out so the
/// binary can show its [`PokedexErrorTrait::user_message`].
pub fn find_in_chain<'a>(
    err: &'a (dyn std::error::Error + 'static),
) -> Option<&'a dyn PokedexErrorTrait> {
    std::iter::successors(Some(err), |e| e.source()).find_map(|e| {
        if let Some(fetch) = e.downcast_ref::<FetchError>() {
            Some(fetch as &dyn PokedexErrorTrait)
        } else {
            e.downcast_ref::<StoreError>()
                .map(|store| store as &dyn PokedexErrorTrait)
        }
    })
}
