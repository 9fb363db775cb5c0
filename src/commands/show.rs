use anyhow::{Context, Result};

use pokedex::catalog::CatalogKey;
use pokedex::views::DetailView;

use super::App;

pub async fn show(app: &App, key: &str) -> Result<()> {
    let key = CatalogKey::parse(key);
    let view = DetailView::new(app.catalog.clone(), app.favorites.clone());

    let detail = view
        .load(&key)
        .await
        .with_context(|| format!("Failed to load '{key}'"))?;
    let favorite = view.is_favorite(&detail).context("Failed to read favorites")?;

    println!("{}{}", detail.title(), if favorite { " *" } else { "" });
    println!("================================");

    for row in detail.descriptions() {
        println!("  {:<16} {}", format!("{}:", row.label), row.value);
    }

    if let Some(text) = detail.flavor_text() {
        println!("\n  {text}");
    }

    let images = detail.images();
    if !images.is_empty() {
        println!("\nImages:");
        for image in images {
            println!("  {image}");
        }
    }

    Ok(())
}
