//! Error types for the Pokedex client
//!
//! Provides unified error handling using thiserror. The cache itself is
//! infallible; everything here comes from the network, payloads, or disk.

use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for commands and the PokeAPI client.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Transport-level HTTP failure
    #[error("failed to fetch data: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with something other than 200 OK
    #[error("unexpected status code {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    /// Payload did not match the expected JSON shape
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reading or writing the saved Pokedex failed
    #[error("pokedex file error: {0}")]
    Io(#[from] std::io::Error),

    /// Command needs an argument that was not given
    #[error("you must specify {0}")]
    MissingArgument(&'static str),

    /// Invalid configuration value
    #[error("invalid configuration: {0}")]
    Config(String),
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex client.
pub type Result<T> = std::result::Result<T, PokedexError>;
