pub mod models;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{PokedexError, Result};
pub use models::{FlavorTextEntry, NamedResource, Pokemon, Species, Sprites, TypeSlot};

/// Where creature records come from
#[async_trait]
pub trait PokeDataSource: Send + Sync {
    /// Fetch a creature by lower-case name or national number
    async fn fetch_pokemon(&self, identifier: &str) -> Result<Pokemon>;

    /// Fetch the species record a creature links to
    async fn fetch_species(&self, url: &str) -> Result<Species>;
}

/// PokeAPI over HTTP. One GET per call, no retries, no caching.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PokeApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            PokedexError::InvalidRequest(format!("Invalid PokeAPI base URL '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PokedexError::InvalidRequest(format!(
                "PokeAPI base URL cannot be a base: {}",
                base_url
            )));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/pokemon/{identifier}` with the identifier percent-encoded
    pub fn pokemon_url(&self, identifier: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("pokemon").push(identifier);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        tracing::debug!(url = %url, "Fetching {}", what);

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(PokedexError::NotFound(format!("{} at {}", what, url)));
        }
        if !status.is_success() {
            return Err(PokedexError::Upstream(format!(
                "{} returned status {}",
                url, status
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PokeDataSource for PokeApiClient {
    async fn fetch_pokemon(&self, identifier: &str) -> Result<Pokemon> {
        self.get_json(self.pokemon_url(identifier), "pokemon").await
    }

    async fn fetch_species(&self, url: &str) -> Result<Species> {
        let url = Url::parse(url)
            .map_err(|e| PokedexError::Upstream(format!("Invalid species URL '{}': {}", url, e)))?;
        self.get_json(url, "species").await
    }
}
