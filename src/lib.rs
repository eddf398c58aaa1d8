//! Pokedex - An interactive PokeAPI explorer
//!
//! Walks location areas, catches Pokemon into a saved Pokedex, and keeps raw
//! API responses in an expiring in-memory cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pokedex;
pub mod repl;
pub mod tasks;

pub use api::PokeApiClient;
pub use cache::Cache;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use pokedex::Pokedex;
