//! REST payload shapes and their normalization into domain models.
//!
//! Field names mirror the upstream JSON exactly; anything the app does not
//! read is simply left out of the structs.

use std::collections::HashSet;

use serde::Deserialize;

use crate::models::{EntryDetails, SpeciesProfile, StatValue};

/// `{name, url}` pair used all over the REST payloads.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedRef {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl NamedRef {
    /// Numeric id from the trailing path segment of `url`.
    pub fn trailing_id(&self) -> Option<u32> {
        self.url.as_deref().and_then(id_from_url)
    }
}

/// Parse the trailing numeric segment of a resource URL, e.g.
/// `.../pokemon-species/133/` yields 133.
pub fn id_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

// ==== Listing fallback ====

#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub results: Vec<ListingItem>,
}

#[derive(Debug, Deserialize)]
pub struct ListingItem {
    pub name: String,
    pub url: String,
}

impl ListingItem {
    pub fn id(&self) -> Option<u32> {
        id_from_url(&self.url)
    }
}

// ==== Entry detail ====

#[derive(Debug, Deserialize)]
pub struct PokemonDetailDto {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub types: Vec<DetailTypeSlot>,
    #[serde(default)]
    pub sprites: Option<Sprites>,
}

#[derive(Debug, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedRef,
}

#[derive(Debug, Deserialize)]
pub struct StatSlot {
    pub base_stat: u32,
    pub stat: NamedRef,
}

#[derive(Debug, Deserialize)]
pub struct DetailTypeSlot {
    #[serde(default)]
    pub slot: Option<u32>,
    #[serde(rename = "type")]
    pub kind: NamedRef,
}

#[derive(Debug, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

impl PokemonDetailDto {
    /// Normalize into display units: metres, kilograms, slot-ordered types.
    pub fn into_details(mut self) -> EntryDetails {
        self.types.sort_by_key(|t| t.slot.unwrap_or(u32::MAX));
        EntryDetails {
            id: self.id,
            name: self.name,
            types: self.types.into_iter().map(|t| t.kind.name).collect(),
            height_m: f64::from(self.height) / 10.0,
            weight_kg: f64::from(self.weight) / 10.0,
            abilities: self.abilities.into_iter().map(|a| a.ability.name).collect(),
            stats: self
                .stats
                .into_iter()
                .map(|s| StatValue {
                    name: s.stat.name,
                    value: s.base_stat,
                })
                .collect(),
            sprite_url: self.sprites.and_then(|s| s.front_default),
        }
    }
}

// ==== Species ====

#[derive(Debug, Deserialize)]
pub struct SpeciesDto {
    pub id: u32,
    #[serde(default)]
    pub names: Vec<LocalizedNameEntry>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorEntry>,
    #[serde(default)]
    pub evolution_chain: Option<ResourceRef>,
}

#[derive(Debug, Deserialize)]
pub struct LocalizedNameEntry {
    pub name: String,
    pub language: NamedRef,
}

#[derive(Debug, Deserialize)]
pub struct FlavorEntry {
    pub flavor_text: String,
    pub language: NamedRef,
}

#[derive(Debug, Deserialize)]
pub struct ResourceRef {
    pub url: String,
}

impl SpeciesDto {
    pub fn into_profile(self) -> SpeciesProfile {
        let pick_name = |code: &str| {
            self.names
                .iter()
                .find(|n| n.language.name == code)
                .map(|n| n.name.clone())
        };
        let pick_flavor = |code: &str| {
            self.flavor_text_entries
                .iter()
                .find(|f| f.language.name == code)
                .map(|f| clean_flavor_text(&f.flavor_text))
        };
        SpeciesProfile {
            id: self.id,
            name_en: pick_name("en"),
            name_ko: pick_name("ko"),
            flavor_en: pick_flavor("en"),
            flavor_ko: pick_flavor("ko"),
            evolution_chain_url: self.evolution_chain.map(|r| r.url),
        }
    }
}

/// Flavor text embeds form feeds and hard newlines from the game data;
/// flatten them to spaces for single-paragraph display.
pub fn clean_flavor_text(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '\u{000c}' | '\n' | '\r' => ' ',
            other => other,
        })
        .collect()
}

// ==== Evolution chain ====

#[derive(Debug, Deserialize)]
pub struct EvolutionChainDto {
    pub chain: ChainLink,
}

#[derive(Debug, Deserialize)]
pub struct ChainLink {
    pub species: NamedRef,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

impl ChainLink {
    fn collect_ids(&self, out: &mut Vec<u32>) {
        if let Some(id) = self.species.trailing_id() {
            out.push(id);
        }
        for next in &self.evolves_to {
            next.collect_ids(out);
        }
    }
}

impl EvolutionChainDto {
    /// Species ids in depth-first order, so branches read base form first.
    pub fn lineage_ids(&self) -> Vec<u32> {
        let mut ids = Vec::new();
        self.chain.collect_ids(&mut ids);
        ids
    }
}

// ==== Type membership ====

#[derive(Debug, Deserialize)]
pub struct TypeDto {
    #[serde(default)]
    pub pokemon: Vec<TypeMemberSlot>,
}

#[derive(Debug, Deserialize)]
pub struct TypeMemberSlot {
    pub pokemon: NamedRef,
}

impl TypeDto {
    /// Canonical names of every member of the type.
    pub fn member_names(self) -> HashSet<String> {
        self.pokemon.into_iter().map(|slot| slot.pokemon.name).collect()
    }
}
