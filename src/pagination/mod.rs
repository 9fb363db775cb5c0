//! Pagination, debouncing and incremental search
//!
//! - [`window`]: offset/limit/total arithmetic
//! - [`debounce`]: single-slot quiet-period timer
//! - [`search`]: term classification and matching
//! - [`coordinator`]: the state machine tying them to a catalog

pub mod coordinator;
pub mod debounce;
pub mod search;
pub mod window;

pub use coordinator::{Coordinator, CoordinatorSnapshot, SearchSettings};
pub use debounce::Debouncer;
pub use search::{match_listing, search_local, SearchQuery, SearchState};
pub use window::PageWindow;
