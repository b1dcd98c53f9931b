//! Per-entry detail models populated by the detail screen fetches.

use serde::{Deserialize, Serialize};

use crate::lang::Language;

/// Upper bound of a base stat value, used to scale gauge bars.
pub const STAT_MAX: u32 = 255;

/// Official artwork lives in the sprites repository, keyed by dex number.
pub fn artwork_url(id: u32) -> String {
    format!(
        "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/{id}.png"
    )
}

/// A named base stat in upstream order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatValue {
    pub name: String,
    pub value: u32,
}

impl StatValue {
    /// Fraction of the stat gauge to fill, clamped to 1.0.
    pub fn ratio(&self) -> f64 {
        (self.value as f64 / STAT_MAX as f64).min(1.0)
    }
}

/// Physical data for a single entry, normalized from the detail endpoint.
///
/// Height and weight arrive in decimetres and hectograms and are converted
/// to metres and kilograms here, once.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDetails {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub height_m: f64,
    pub weight_kg: f64,
    pub abilities: Vec<String>,
    pub stats: Vec<StatValue>,
    pub sprite_url: Option<String>,
}

impl EntryDetails {
    pub fn artwork_url(&self) -> String {
        artwork_url(self.id)
    }
}

/// Species-level data: localized names, flavor text, lineage pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesProfile {
    pub id: u32,
    pub name_en: Option<String>,
    pub name_ko: Option<String>,
    pub flavor_en: Option<String>,
    pub flavor_ko: Option<String>,
    pub evolution_chain_url: Option<String>,
}

impl SpeciesProfile {
    /// Flavor text for the language, falling back to English.
    pub fn flavor(&self, lang: Language) -> Option<&str> {
        let preferred = match lang {
            Language::En => self.flavor_en.as_deref(),
            Language::Ko => self.flavor_ko.as_deref(),
        };
        preferred.or(self.flavor_en.as_deref())
    }

    /// Localized display name, falling back to English.
    pub fn localized_name(&self, lang: Language) -> Option<&str> {
        let preferred = match lang {
            Language::En => self.name_en.as_deref(),
            Language::Ko => self.name_ko.as_deref(),
        };
        preferred.or(self.name_en.as_deref())
    }
}
