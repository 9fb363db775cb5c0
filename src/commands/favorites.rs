use anyhow::{Context, Result};
use clap::Subcommand;

use pokedex::views::FavoritesView;

use super::{print_items, App};

#[derive(Subcommand)]
pub enum FavoritesAction {
    /// List favorites with their details
    List {
        /// Page to show (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Add an id to the favorites
    Add { id: u32 },

    /// Remove an id from the favorites
    Remove { id: u32 },

    /// Remove every favorite
    Clear,
}

pub async fn favorites(app: &App, action: FavoritesAction) -> Result<()> {
    match action {
        FavoritesAction::List { page } => list(app, page).await?,
        FavoritesAction::Add { id } => {
            if app.favorites.add(id).context("Failed to save favorites")? {
                println!("Added #{id} to favorites");
            } else {
                println!("#{id} is already a favorite");
            }
        }
        FavoritesAction::Remove { id } => {
            if app.favorites.remove(id).context("Failed to save favorites")? {
                println!("Removed #{id} from favorites");
            } else {
                println!("#{id} is not a favorite");
            }
        }
        FavoritesAction::Clear => {
            app.favorites.clear().context("Failed to clear favorites")?;
            println!("Favorites cleared");
        }
    }

    app.favorites.flush_events().await;
    Ok(())
}

async fn list(app: &App, page: usize) -> Result<()> {
    let view = FavoritesView::new(app.catalog.clone(), app.favorites.clone(), app.settings());
    let report = view.load().await.context("Failed to read favorites")?;

    if report.loaded == 0 && report.failed.is_empty() {
        println!("No favorites yet. Add one with: pokedex favorites add <id>");
        return Ok(());
    }

    for _ in 1..page {
        if !view.next_page().await {
            break;
        }
    }

    let snapshot = view.snapshot().await;
    let ids: Vec<u32> = view.items().await.iter().map(|item| item.id).collect();

    println!(
        "Favorites: page {}/{} ({} total)",
        snapshot.window.page_number(),
        snapshot.window.page_count().max(1),
        snapshot.window.total()
    );
    println!("================================");
    print_items(&snapshot.page, &ids);

    if !report.is_complete() {
        println!("\nCould not load: {:?}", report.failed);
    }

    Ok(())
}
