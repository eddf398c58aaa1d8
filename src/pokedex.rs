//! Pokedex Module
//!
//! The user's collection of caught Pokemon, saved as pretty JSON.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::CaughtPokemon;

// == Pokedex ==
/// Caught Pokemon keyed by lowercase name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pokedex {
    pokemon: BTreeMap<String, CaughtPokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    // == Load ==
    /// Reads a saved Pokedex. A missing file yields an empty Pokedex.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let pokedex: Self = serde_json::from_str(&content)?;
                info!("Loaded {} caught Pokemon from {}", pokedex.len(), path.display());
                Ok(pokedex)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No saved Pokedex at {}", path.display());
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    // == Save ==
    /// Writes the Pokedex to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        debug!("Saved {} caught Pokemon to {}", self.len(), path.display());
        Ok(())
    }

    /// Records a catch, replacing any earlier record of the same name.
    pub fn add(&mut self, pokemon: CaughtPokemon) {
        self.pokemon.insert(pokemon.name.to_lowercase(), pokemon);
    }

    pub fn get(&self, name: &str) -> Option<&CaughtPokemon> {
        self.pokemon.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pokemon.contains_key(&name.to_lowercase())
    }

    /// Iterates in name order.
    pub fn iter(&self) -> impl Iterator<Item = &CaughtPokemon> {
        self.pokemon.values()
    }

    pub fn len(&self) -> usize {
        self.pokemon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty()
    }
}
