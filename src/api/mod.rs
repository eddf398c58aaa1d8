//! API Module
//!
//! PokeAPI access through the expiring response cache.
//!
//! # Endpoints
//! - `GET /location-area?offset=&limit=` - Paginated location areas
//! - `GET /location-area/{name}` - Pokemon encountered in an area
//! - `GET /pokemon/{name}` - Pokemon details

pub mod client;

pub use client::{Fetched, PokeApiClient};
