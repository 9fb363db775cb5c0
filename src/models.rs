// Core data structures for the pokedex client
//
// Remote payloads are parsed into these types at the client boundary, so the
// rest of the crate never handles untyped JSON.

use serde::{Deserialize, Serialize};

use crate::utils::{parse_resource_id, sprite_url};

/// A `{name, url}` pair as returned by the catalog for linked resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl NamedResource {
    /// Numeric id parsed out of the resource URL
    pub fn id(&self) -> Option<u32> {
        parse_resource_id(&self.url)
    }
}

/// One page of the catalog listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage {
    /// Total number of entries in the catalog
    pub count: usize,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

impl ListPage {
    /// Convert listing entries into summaries
    ///
    /// Summary ids are the 1-based position in the full listing
    /// (`offset + idx + 1`), whatever the entry's resource URL says.
    pub fn to_items(&self, offset: usize, sprite_base: &str) -> Vec<CatalogItem> {
        self.results
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let id = u32::try_from(offset + idx + 1).unwrap_or(u32::MAX);
                CatalogItem::new(id, &entry.name, sprite_url(sprite_base, id))
            })
            .collect()
    }
}

/// Summary of a catalog entry as rendered in lists and search results
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u32,
    pub name: String,
    pub image: String,
}

impl CatalogItem {
    pub fn new(id: u32, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: image.into(),
        }
    }
}

/// Sprite URLs of an item; every field is optional in the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub back_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
    #[serde(default)]
    pub back_shiny: Option<String>,
    #[serde(default)]
    pub front_female: Option<String>,
    #[serde(default)]
    pub back_female: Option<String>,
}

impl Sprites {
    /// All present sprites, front before back, default before shiny before female
    pub fn gallery(&self) -> Vec<&str> {
        [
            &self.front_default,
            &self.back_default,
            &self.front_shiny,
            &self.back_shiny,
            &self.front_female,
            &self.back_female,
        ]
        .into_iter()
        .filter_map(|sprite| sprite.as_deref())
        .filter(|sprite| !sprite.is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
    pub slot: u8,
}

/// Full item record returned by the single-item lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
}

impl Pokemon {
    /// Summary for lists, falling back to the constructed sprite URL
    pub fn to_item(&self, sprite_base: &str) -> CatalogItem {
        let image = self
            .sprites
            .front_default
            .clone()
            .filter(|sprite| !sprite.is_empty())
            .unwrap_or_else(|| sprite_url(sprite_base, self.id));
        CatalogItem::new(self.id, &self.name, image)
    }

    /// Type names in slot order
    pub fn type_names(&self) -> Vec<&str> {
        let mut slots: Vec<&TypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|t| t.slot);
        slots.into_iter().map(|t| t.kind.name.as_str()).collect()
    }

    /// Ability names in slot order
    pub fn ability_names(&self) -> Vec<&str> {
        let mut slots: Vec<&AbilitySlot> = self.abilities.iter().collect();
        slots.sort_by_key(|a| a.slot);
        slots.into_iter().map(|a| a.ability.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorText {
    pub flavor_text: String,
    pub language: NamedResource,
}

/// Species metadata record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub habitat: Option<NamedResource>,
    #[serde(default)]
    pub color: Option<NamedResource>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
}

impl Species {
    /// First flavor text in the given language, with layout characters flattened
    pub fn flavor_text(&self, language: &str) -> Option<String> {
        self.flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == language)
            .map(|entry| {
                entry
                    .flavor_text
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
    }
}
