//! View models for the listing, detail and favorites screens
//!
//! Views bind a [`Coordinator`](crate::pagination::Coordinator) and the
//! favorites service to what a front end renders. They hold no rendering
//! logic themselves.

pub mod detail;
pub mod favorites;
pub mod listing;

pub use detail::{Description, DetailView, PokemonDetail};
pub use favorites::{FavoritesView, LoadReport};
pub use listing::{ListRow, ListView};
