//! Data models
//!
//! PokeAPI response shapes and the records kept in the local Pokedex.

pub mod pokemon;
pub mod responses;

// Re-export commonly used types
pub use pokemon::{CaughtPokemon, StatValue};
pub use responses::{
    LocationAreaDetail, LocationAreaPage, NamedResource, PokemonEncounter, PokemonResponse,
    PokemonStat, PokemonType,
};
