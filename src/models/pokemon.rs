//! Records stored in the user's Pokedex

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PokemonResponse;

/// A single base stat, kept in API order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatValue {
    pub name: String,
    pub value: u32,
}

/// A caught Pokemon as saved to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaughtPokemon {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub base_experience: Option<u32>,
    pub stats: Vec<StatValue>,
    pub types: Vec<String>,
    pub caught_at: DateTime<Utc>,
}

impl CaughtPokemon {
    /// Builds the record from an API response, stamped now.
    pub fn from_response(response: &PokemonResponse) -> Self {
        Self {
            name: response.name.clone(),
            height: response.height,
            weight: response.weight,
            base_experience: response.base_experience,
            stats: response
                .stats
                .iter()
                .map(|s| StatValue {
                    name: s.stat.name.clone(),
                    value: s.base_stat,
                })
                .collect(),
            types: response.types.iter().map(|t| t.kind.name.clone()).collect(),
            caught_at: Utc::now(),
        }
    }
}
