//! Common test utilities

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use pokedex::catalog::{CatalogApi, CatalogKey};
use pokedex::models::{
    CatalogItem, FlavorText, ListPage, NamedResource, Pokemon, Species, Sprites,
};
use pokedex::pagination::SearchSettings;
use pokedex::utils::error::FetchError;

pub const SPRITES: &str = "https://sprites.test";

const KANTO: [&str; 30] = [
    "bulbasaur",
    "ivysaur",
    "venusaur",
    "charmander",
    "charmeleon",
    "charizard",
    "squirtle",
    "wartortle",
    "blastoise",
    "caterpie",
    "metapod",
    "butterfree",
    "weedle",
    "kakuna",
    "beedrill",
    "pidgey",
    "pidgeotto",
    "pidgeot",
    "rattata",
    "raticate",
    "spearow",
    "fearow",
    "ekans",
    "arbok",
    "pikachu",
    "raichu",
    "sandshrew",
    "sandslash",
    "nidoran-f",
    "nidorina",
];

/// Create a full record with a front sprite
pub fn pokemon(id: u32, name: &str) -> Pokemon {
    Pokemon {
        id,
        name: name.to_string(),
        height: Some(id * 2),
        weight: Some(id * 10),
        base_experience: Some(64),
        sprites: Sprites {
            front_default: Some(format!("https://img.test/{id}.png")),
            ..Sprites::default()
        },
        types: Vec::new(),
        abilities: Vec::new(),
    }
}

/// Summary as produced from [`pokemon`]
pub fn item(id: u32, name: &str) -> CatalogItem {
    CatalogItem::new(id, name, format!("https://img.test/{id}.png"))
}

pub fn species(id: u32, name: &str) -> Species {
    Species {
        id,
        name: name.to_string(),
        habitat: Some(NamedResource {
            name: "forest".to_string(),
            url: "https://pokeapi.co/api/v2/pokemon-habitat/2/".to_string(),
        }),
        color: Some(NamedResource {
            name: "yellow".to_string(),
            url: "https://pokeapi.co/api/v2/pokemon-color/10/".to_string(),
        }),
        flavor_text_entries: vec![FlavorText {
            flavor_text: "When several of\nthese POKéMON gather,".to_string(),
            language: NamedResource {
                name: "en".to_string(),
                url: "https://pokeapi.co/api/v2/language/9/".to_string(),
            },
        }],
    }
}

pub fn settings(page_size: usize) -> SearchSettings {
    SearchSettings {
        page_size,
        debounce: Duration::from_millis(300),
        fallback_scan_limit: 1000,
        fallback_result_cap: 20,
        sprite_base_url: SPRITES.to_string(),
    }
}

/// In-memory catalog with call recording and optional per-key latency
#[derive(Default)]
pub struct FakeCatalog {
    entries: Vec<Pokemon>,
    species: HashMap<u32, Species>,
    delays: HashMap<String, Duration>,
    failing: HashSet<u32>,
    pub pokemon_calls: Mutex<Vec<String>>,
    pub species_calls: Mutex<Vec<String>>,
    pub list_calls: Mutex<Vec<(usize, usize)>>,
}

impl FakeCatalog {
    /// Ids 1-30 plus pichu (#172)
    pub fn kanto() -> Self {
        let mut entries: Vec<Pokemon> = KANTO
            .iter()
            .enumerate()
            .map(|(idx, name)| pokemon(idx as u32 + 1, name))
            .collect();
        entries.push(pokemon(172, "pichu"));

        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn with_entries(entries: Vec<Pokemon>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn with_species(mut self, species: Species) -> Self {
        self.species.insert(species.id, species);
        self
    }

    /// Delay `get_pokemon` for this key (as displayed, e.g. "25" or "pikachu")
    pub fn with_delay(mut self, key: &str, delay: Duration) -> Self {
        self.delays.insert(key.to_string(), delay);
        self
    }

    /// Make `get_pokemon` fail with a server error for this id
    pub fn with_failure(mut self, id: u32) -> Self {
        self.failing.insert(id);
        self
    }

    pub fn pokemon_calls(&self) -> Vec<String> {
        self.pokemon_calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> Vec<(usize, usize)> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.pokemon_calls.lock().unwrap().len()
            + self.species_calls.lock().unwrap().len()
            + self.list_calls.lock().unwrap().len()
    }

    fn find(&self, key: &CatalogKey) -> Option<&Pokemon> {
        self.entries.iter().find(|p| match key {
            CatalogKey::Id(id) => p.id == *id,
            CatalogKey::Name(name) => p.name == *name,
        })
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn list_page(&self, offset: usize, limit: usize) -> Result<ListPage, FetchError> {
        self.list_calls.lock().unwrap().push((offset, limit));

        let results = self
            .entries
            .iter()
            .skip(offset)
            .take(limit)
            .map(|p| NamedResource {
                name: p.name.clone(),
                url: format!("https://pokeapi.co/api/v2/pokemon/{}/", p.id),
            })
            .collect();

        Ok(ListPage {
            count: self.entries.len(),
            next: None,
            previous: None,
            results,
        })
    }

    async fn get_pokemon(&self, key: &CatalogKey) -> Result<Pokemon, FetchError> {
        let label = key.to_string();
        self.pokemon_calls.lock().unwrap().push(label.clone());

        if let Some(delay) = self.delays.get(&label) {
            tokio::time::sleep(*delay).await;
        }

        let found = self
            .find(key)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(label.clone()))?;
        if self.failing.contains(&found.id) {
            return Err(FetchError::ServerError(500));
        }
        Ok(found)
    }

    async fn get_species(&self, key: &CatalogKey) -> Result<Species, FetchError> {
        let label = key.to_string();
        self.species_calls.lock().unwrap().push(label.clone());

        self.find(key)
            .and_then(|p| self.species.get(&p.id))
            .cloned()
            .ok_or(FetchError::NotFound(label))
    }
}
