//! Single item detail view

use serde::Serialize;
use std::sync::Arc;

use crate::catalog::{CatalogApi, CatalogKey};
use crate::favorites::{Favorites, FavoritesStore};
use crate::models::{Pokemon, Species};
use crate::utils::display_name;
use crate::utils::error::{FetchError, StoreError};

const UNKNOWN: &str = "Unknown";

/// Label/value row shown under the images
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    pub label: &'static str,
    pub value: String,
}

impl Description {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// A loaded item plus its species, when that could be fetched
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PokemonDetail {
    pub pokemon: Pokemon,
    pub species: Option<Species>,
}

impl PokemonDetail {
    pub fn id(&self) -> u32 {
        self.pokemon.id
    }

    pub fn title(&self) -> String {
        format!("#{} {}", self.pokemon.id, display_name(&self.pokemon.name))
    }

    pub fn descriptions(&self) -> Vec<Description> {
        let pokemon = &self.pokemon;
        let number = |value: Option<u32>| value.map_or_else(|| UNKNOWN.to_string(), |v| v.to_string());
        let species_field = |pick: fn(&Species) -> Option<&str>| {
            self.species
                .as_ref()
                .and_then(pick)
                .filter(|name| !name.is_empty())
                .unwrap_or(UNKNOWN)
                .to_string()
        };

        vec![
            Description::new("Height", number(pokemon.height)),
            Description::new("Weight", number(pokemon.weight)),
            Description::new("Base Experience", number(pokemon.base_experience)),
            Description::new("Types", pokemon.type_names().join(", ")),
            Description::new("Abilities", pokemon.ability_names().join(", ")),
            Description::new(
                "Habitat",
                species_field(|s| s.habitat.as_ref().map(|h| h.name.as_str())),
            ),
            Description::new(
                "Color",
                species_field(|s| s.color.as_ref().map(|c| c.name.as_str())),
            ),
        ]
    }

    /// Non-empty sprite URLs, front before back, default before shiny before female
    pub fn images(&self) -> Vec<&str> {
        self.pokemon.sprites.gallery()
    }

    /// First English flavor text, whitespace flattened
    pub fn flavor_text(&self) -> Option<String> {
        self.species.as_ref().and_then(|s| s.flavor_text("en"))
    }
}

pub struct DetailView<C: ?Sized, S: ?Sized> {
    catalog: Arc<C>,
    favorites: Favorites<S>,
}

impl<C, S> DetailView<C, S>
where
    C: CatalogApi + ?Sized,
    S: FavoritesStore + ?Sized,
{
    pub fn new(catalog: Arc<C>, favorites: Favorites<S>) -> Self {
        Self { catalog, favorites }
    }

    /// Fetch the item, then its species under the same key
    ///
    /// # Errors
    ///
    /// Fails only when the item itself cannot be fetched; a species failure
    /// is logged and leaves `species` empty.
    pub async fn load(&self, key: &CatalogKey) -> Result<PokemonDetail, FetchError> {
        let pokemon = self.catalog.get_pokemon(key).await?;

        let species = match self.catalog.get_species(key).await {
            Ok(species) => Some(species),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Species lookup failed");
                None
            }
        };

        Ok(PokemonDetail { pokemon, species })
    }

    pub fn is_favorite(&self, detail: &PokemonDetail) -> Result<bool, StoreError> {
        self.favorites.contains(detail.id())
    }

    /// Flip the favorite flag of the shown item; returns the new state
    pub fn toggle_favorite(&self, detail: &PokemonDetail) -> Result<bool, StoreError> {
        self.favorites.toggle(detail.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AbilitySlot, NamedResource, Sprites, TypeSlot};

    fn resource(name: &str) -> NamedResource {
        NamedResource {
            name: name.to_string(),
            url: String::new(),
        }
    }

    fn pikachu() -> Pokemon {
        Pokemon {
            id: 25,
            name: "pikachu".to_string(),
            height: Some(4),
            weight: Some(60),
            base_experience: None,
            sprites: Sprites {
                front_default: Some("front.png".to_string()),
                back_default: Some(String::new()),
                front_shiny: Some("shiny.png".to_string()),
                ..Sprites::default()
            },
            types: vec![TypeSlot {
                slot: 1,
                kind: resource("electric"),
            }],
            abilities: vec![
                AbilitySlot {
                    ability: resource("lightning-rod"),
                    is_hidden: true,
                    slot: 3,
                },
                AbilitySlot {
                    ability: resource("static"),
                    is_hidden: false,
                    slot: 1,
                },
            ],
        }
    }

    #[test]
    fn test_descriptions_without_species() {
        let detail = PokemonDetail {
            pokemon: pikachu(),
            species: None,
        };

        let rows = detail.descriptions();
        let labels: Vec<_> = rows.iter().map(|d| d.label).collect();
        assert_eq!(
            labels,
            vec!["Height", "Weight", "Base Experience", "Types", "Abilities", "Habitat", "Color"]
        );
        assert_eq!(rows[0].value, "4");
        assert_eq!(rows[2].value, "Unknown");
        assert_eq!(rows[4].value, "static, lightning-rod");
        assert_eq!(rows[5].value, "Unknown");
        assert_eq!(rows[6].value, "Unknown");
    }

    #[test]
    fn test_descriptions_with_species() {
        let detail = PokemonDetail {
            pokemon: pikachu(),
            species: Some(Species {
                id: 25,
                name: "pikachu".to_string(),
                habitat: Some(resource("forest")),
                color: Some(resource("yellow")),
                flavor_text_entries: Vec::new(),
            }),
        };

        let rows = detail.descriptions();
        assert_eq!(rows[5].value, "forest");
        assert_eq!(rows[6].value, "yellow");
        assert_eq!(detail.flavor_text(), None);
    }

    #[test]
    fn test_images_and_title() {
        let detail = PokemonDetail {
            pokemon: pikachu(),
            species: None,
        };
        assert_eq!(detail.images(), vec!["front.png", "shiny.png"]);
        assert_eq!(detail.title(), "#25 Pikachu");
    }
}
