//! PokeAPI Client
//!
//! Fetch-or-cache access to the PokeAPI endpoints the commands use.

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::models::{LocationAreaDetail, LocationAreaPage, PokemonResponse};

/// A decoded payload and whether it came from the cache
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub data: T,
    pub from_cache: bool,
}

impl<T> Fetched<T> {
    fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        Fetched {
            data: f(self.data),
            from_cache: self.from_cache,
        }
    }
}

/// HTTP client for PokeAPI backed by an expiring response cache.
///
/// Raw bodies are cached under their full request URL.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    cache: Cache,
    base: Url,
    base_url: String,
    page_size: u32,
}

impl PokeApiClient {
    /// Creates a client that reads through `cache`.
    ///
    /// Fails with [`PokedexError::Config`] when `base_url` is not an absolute
    /// URL that paths can be appended to.
    pub fn new(
        cache: Cache,
        base_url: impl Into<String>,
        page_size: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .map_err(|e| PokedexError::Config(format!("invalid base URL {:?}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(PokedexError::Config(format!(
                "base URL {:?} cannot carry a path",
                base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            cache,
            base,
            base_url,
            page_size,
        })
    }

    /// Creates a client from configuration.
    pub fn from_config(config: &Config, cache: Cache) -> Result<Self> {
        Self::new(
            cache,
            config.base_url.clone(),
            config.page_size,
            config.request_timeout(),
        )
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the first page of location areas.
    pub fn first_page_url(&self) -> String {
        let mut url = self.endpoint(&["location-area"]);
        url.query_pairs_mut()
            .append_pair("offset", "0")
            .append_pair("limit", &self.page_size.to_string());
        url.into()
    }

    pub fn location_area_url(&self, name: &str) -> String {
        self.endpoint(&["location-area", name]).into()
    }

    pub fn pokemon_url(&self, name: &str) -> String {
        self.endpoint(&["pokemon", name]).into()
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // `new` rejects bases that cannot carry a path
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    // == Get Bytes ==
    /// Returns the body for `url`, from the cache when present.
    ///
    /// On a miss the body of a 200 response is cached before it is returned.
    /// Non-200 responses are not cached.
    pub async fn get_bytes(&self, url: &str) -> Result<Fetched<Vec<u8>>> {
        if let Some(body) = self.cache.lookup(url) {
            debug!("Cache hit for {}", url);
            return Ok(Fetched {
                data: body,
                from_cache: true,
            });
        }

        info!("Fetching {}", url);
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(PokedexError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?.to_vec();
        self.cache.store(url, body.clone());

        Ok(Fetched {
            data: body,
            from_cache: false,
        })
    }

    /// Fetches and decodes JSON from `url`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Fetched<T>> {
        let fetched = self.get_bytes(url).await?;
        let data = serde_json::from_slice(&fetched.data)?;
        Ok(fetched.map(|_| data))
    }

    /// One page of location areas at `url` (see [`Self::first_page_url`]).
    pub async fn location_areas(&self, url: &str) -> Result<Fetched<LocationAreaPage>> {
        self.get_json(url).await
    }

    pub async fn location_area(&self, name: &str) -> Result<Fetched<LocationAreaDetail>> {
        self.get_json(&self.location_area_url(name)).await
    }

    pub async fn pokemon(&self, name: &str) -> Result<Fetched<PokemonResponse>> {
        self.get_json(&self.pokemon_url(name)).await
    }
}
