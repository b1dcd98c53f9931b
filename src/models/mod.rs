//! Domain models shared across the catalog, cache, and UI layers.

pub mod catalog;
pub mod detail;

pub use catalog::{CatalogEntry, CatalogSnapshot, KNOWN_TYPES, SNAPSHOT_TTL_HOURS};
pub use detail::{artwork_url, EntryDetails, SpeciesProfile, StatValue, STAT_MAX};
