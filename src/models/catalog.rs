//! Catalog entry and snapshot types.
//!
//! A `CatalogSnapshot` is the unit the cache stores and the filter engine
//! reads: the full species list in ascending id order plus the instant it
//! was captured. Snapshots are replaced whole, never patched in place.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::lang::Language;

/// Hours a persisted snapshot stays servable without a refetch.
pub const SNAPSHOT_TTL_HOURS: i64 = 24;

/// Every type tag the upstream data set uses.
pub const KNOWN_TYPES: [&str; 18] = [
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

/// One species in the catalog.
///
/// `name` is the canonical lowercase identifier and is always present; when
/// the upstream row carried no English name a `species-{id}` placeholder is
/// synthesized during normalization. `types` may be empty when the entry
/// came from the bare listing endpoint and has not been resolved yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub local_name: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub generation: Option<u32>,
}

impl CatalogEntry {
    /// Name to show for the given language, falling back to an id
    /// placeholder when the localized name is missing.
    pub fn display_name(&self, lang: Language) -> String {
        match lang {
            Language::En => self.name.clone(),
            Language::Ko => self
                .local_name
                .clone()
                .unwrap_or_else(|| self.formatted_id()),
        }
    }

    /// Zero-padded dex number, e.g. `#0004`.
    pub fn formatted_id(&self) -> String {
        format!("#{:04}", self.id)
    }

    /// Whether the entry still needs its type tags resolved.
    pub fn types_unresolved(&self) -> bool {
        self.types.is_empty()
    }
}

/// The full catalog plus the instant it was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub entries: Vec<CatalogEntry>,
    pub captured_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    /// Snapshot captured now. Entries must already be sorted by id.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries,
            captured_at: Utc::now(),
        }
    }

    /// Snapshot with an explicit capture time.
    pub fn with_timestamp(entries: Vec<CatalogEntry>, captured_at: DateTime<Utc>) -> Self {
        Self {
            entries,
            captured_at,
        }
    }

    /// Whether the snapshot is still inside its TTL as of `now`. The
    /// boundary instant itself counts as expired.
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.captured_at) < Duration::hours(SNAPSHOT_TTL_HOURS)
    }

    /// Whether the snapshot is still inside its TTL right now.
    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Utc::now())
    }

    /// Look up an entry by dex number. Entries are sorted, so this is a
    /// binary search.
    pub fn entry_by_id(&self, id: u32) -> Option<&CatalogEntry> {
        self.entries
            .binary_search_by_key(&id, |entry| entry.id)
            .ok()
            .map(|idx| &self.entries[idx])
    }

    /// Highest generation number present, if any entry carries one.
    pub fn max_generation(&self) -> Option<u32> {
        self.entries.iter().filter_map(|entry| entry.generation).max()
    }

    /// Whether any entry still has an empty type list.
    pub fn has_unresolved_types(&self) -> bool {
        self.entries.iter().any(CatalogEntry::types_unresolved)
    }
}
