//! Key-value persistence boundary.
//!
//! Everything the app persists (favorites, preferences, the catalog
//! snapshot) goes through [`KeyValueStore`] under a small set of stable
//! keys. Callers treat write failures as non-fatal: the in-memory state
//! stays authoritative and the failure is logged where it happens.

mod file;
mod memory;

pub use file::{default_data_dir, FileStore};
pub use memory::MemoryStore;

use thiserror::Error;

/// Key for the persisted favorite id set.
pub const FAVORITES_KEY: &str = "pokedex_favorites";
/// Key for persisted UI preferences (language, theme).
pub const PREFS_KEY: &str = "pokedex_prefs";
/// Key for the persisted catalog snapshot.
pub const SNAPSHOT_KEY: &str = "pokedex_catalog_snapshot";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding failure: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Minimal string-keyed persistence interface.
///
/// Values are opaque strings; callers own the JSON encoding. A missing key
/// reads as `Ok(None)`, not an error.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
