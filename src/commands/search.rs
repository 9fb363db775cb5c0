use anyhow::{Context, Result};

use pokedex::pagination::Coordinator;
use pokedex::views::FavoritesView;

use super::{print_items, App};

pub async fn search(app: &App, term: &str, in_favorites: bool) -> Result<()> {
    let state = if in_favorites {
        let view = FavoritesView::new(app.catalog.clone(), app.favorites.clone(), app.settings());
        let report = view.load().await.context("Failed to read favorites")?;
        if !report.is_complete() {
            println!("Could not load favorites: {:?}", report.failed);
        }
        view.search_now(term).await;
        view.coordinator().search_state().await
    } else {
        let coordinator = Coordinator::remote(app.catalog.clone(), app.settings());
        coordinator.perform_search(term).await;
        coordinator.search_state().await
    };

    if state.results.is_empty() {
        println!("No results found for \"{}\"", term.trim());
        return Ok(());
    }

    let favorite_ids = app.favorites.list().context("Failed to read favorites")?;

    println!("Found {} result(s) for \"{}\":", state.results.len(), state.term);
    print_items(&state.results, &favorite_ids);
    Ok(())
}
