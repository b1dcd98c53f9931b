//! PokeAPI client.
//!
//! The catalog has two upstream paths: a batched GraphQL query that
//! returns names, types, and generations in one round trip, and a plain
//! REST listing used as fallback when the batched query fails. Per-entry
//! data (details, species, evolution chains, type membership) always goes
//! through REST.

pub mod error;
pub mod graphql;
pub mod types;

pub use error::ApiError;

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::models::{CatalogEntry, EntryDetails, SpeciesProfile};
use graphql::{CatalogData, GraphQlResponse, CATALOG_QUERY};
use types::{
    EvolutionChainDto, ListingResponse, PokemonDetailDto, SpeciesDto, TypeDto,
};

/// Production REST base.
pub const REST_BASE_URL: &str = "https://pokeapi.co/api/v2";
/// Production GraphQL endpoint.
pub const GRAPHQL_URL: &str = "https://beta.pokeapi.co/graphql/v1beta";

/// Page size for the listing fallback; large enough to cover the full dex
/// in one request.
const LISTING_LIMIT: u32 = 1300;

#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    rest_base: String,
    graphql_url: String,
}

impl Default for PokeApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PokeApiClient {
    pub fn new() -> Self {
        Self::with_base_urls(REST_BASE_URL.to_string(), GRAPHQL_URL.to_string())
    }

    /// Client pointed at explicit endpoints, used by tests to target a
    /// mock server.
    pub fn with_base_urls(rest_base: String, graphql_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            rest_base,
            graphql_url,
        }
    }

    /// Fetch the whole catalog: batched query first, listing fallback
    /// second. Only when both paths fail is the catalog unavailable.
    pub async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, ApiError> {
        let primary = match self.fetch_catalog_batched().await {
            Ok(entries) => {
                debug!(count = entries.len(), "catalog loaded via batched query");
                return Ok(entries);
            }
            Err(err) => err,
        };
        warn!(error = %primary, "batched catalog query failed, trying listing fallback");
        match self.fetch_catalog_listing().await {
            Ok(entries) => {
                debug!(count = entries.len(), "catalog loaded via listing fallback");
                Ok(entries)
            }
            Err(fallback) => Err(ApiError::RemoteUnavailable {
                primary: primary.to_string(),
                fallback: fallback.to_string(),
            }),
        }
    }

    async fn fetch_catalog_batched(&self) -> Result<Vec<CatalogEntry>, ApiError> {
        let body = serde_json::json!({ "query": CATALOG_QUERY });
        let response = self.http.post(&self.graphql_url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                endpoint: self.graphql_url.clone(),
            });
        }
        let bytes = response.bytes().await?;
        let parsed: GraphQlResponse<CatalogData> = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::malformed(&self.graphql_url, e.to_string()))?;
        let Some(data) = parsed.data else {
            let detail = if parsed.errors.is_empty() {
                "response carried no data".to_string()
            } else {
                parsed.error_summary()
            };
            return Err(ApiError::malformed(&self.graphql_url, detail));
        };
        if data.species.is_empty() {
            return Err(ApiError::malformed(&self.graphql_url, "empty species list"));
        }
        Ok(graphql::entries_from_rows(data.species))
    }

    /// Bare listing: ids and canonical names only. Types, localized names,
    /// and generations stay empty until resolved later.
    async fn fetch_catalog_listing(&self) -> Result<Vec<CatalogEntry>, ApiError> {
        let url = format!("{}/pokemon?limit={}&offset=0", self.rest_base, LISTING_LIMIT);
        let listing: ListingResponse = self.get_json(&url, "pokemon listing").await?;
        let mut entries: Vec<CatalogEntry> = listing
            .results
            .into_iter()
            .filter_map(|item| match item.id() {
                Some(id) => Some(CatalogEntry {
                    id,
                    name: item.name.to_lowercase(),
                    local_name: None,
                    types: Vec::new(),
                    generation: None,
                }),
                None => {
                    debug!(name = %item.name, url = %item.url, "skipping listing item without numeric id");
                    None
                }
            })
            .collect();
        if entries.is_empty() {
            return Err(ApiError::malformed(&url, "listing contained no usable entries"));
        }
        entries.sort_by_key(|e| e.id);
        Ok(entries)
    }

    /// Detail payload for one entry; `key` is a dex number or canonical
    /// name.
    pub async fn fetch_entry_details(&self, key: &str) -> Result<EntryDetails, ApiError> {
        let url = format!("{}/pokemon/{}", self.rest_base, key);
        let dto: PokemonDetailDto = self.get_json(&url, &format!("pokemon/{key}")).await?;
        Ok(dto.into_details())
    }

    /// Species payload: localized names, flavor text, lineage pointer.
    pub async fn fetch_species(&self, key: &str) -> Result<SpeciesProfile, ApiError> {
        let url = format!("{}/pokemon-species/{}", self.rest_base, key);
        let dto: SpeciesDto = self.get_json(&url, &format!("pokemon-species/{key}")).await?;
        Ok(dto.into_profile())
    }

    /// Flattened evolution chain, following the URL the species payload
    /// supplied.
    pub async fn fetch_evolution_chain(&self, url: &str) -> Result<Vec<u32>, ApiError> {
        let dto: EvolutionChainDto = self.get_json(url, "evolution chain").await?;
        Ok(dto.lineage_ids())
    }

    /// Names of every member of a type, for filtering unresolved entries.
    pub async fn fetch_type_members(&self, tag: &str) -> Result<HashSet<String>, ApiError> {
        let url = format!("{}/type/{}", self.rest_base, tag);
        let dto: TypeDto = self.get_json(&url, &format!("type/{tag}")).await?;
        Ok(dto.member_names())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        resource: &str,
    ) -> Result<T, ApiError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status.as_u16() == 404 {
            return Err(ApiError::NotFound {
                resource: resource.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                endpoint: url.to_string(),
            });
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::malformed(url, e.to_string()))
    }
}
