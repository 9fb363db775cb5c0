use anyhow::{Context, Result};

use pokedex::views::ListView;

use super::{print_items, App};

pub async fn browse(app: &App, page: usize) -> Result<()> {
    let view = ListView::new(app.catalog.clone(), app.favorites.clone(), app.settings());

    view.load().await.context("Failed to load catalog page")?;
    if page > 1 {
        view.go_to_page(page)
            .await
            .with_context(|| format!("Failed to load page {page}"))?;
    }

    let snapshot = view.snapshot().await;
    let window = snapshot.window;
    let favorite_ids = app.favorites.list().context("Failed to read favorites")?;

    println!(
        "Page {}/{} ({} total)",
        window.page_number(),
        window.page_count().max(1),
        window.total()
    );
    println!("================================");
    print_items(&snapshot.page, &favorite_ids);

    if window.has_next() {
        println!("\nNext: pokedex browse --page {}", window.page_number() + 1);
    }

    Ok(())
}
