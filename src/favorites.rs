//! Persisted set of favorite entries.
//!
//! The in-memory set is authoritative; every mutation is written through
//! to storage as a sorted id array. A failed write keeps the session state
//! and only logs, so favoriting still works without a writable disk.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::warn;

use crate::storage::{KeyValueStore, FAVORITES_KEY};

pub struct FavoritesStore {
    ids: HashSet<u32>,
    store: Arc<dyn KeyValueStore>,
}

impl FavoritesStore {
    /// Load the persisted set; absent or unreadable data starts empty.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let ids = match store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<u32>>(&raw) {
                Ok(ids) => ids.into_iter().collect(),
                Err(err) => {
                    warn!(error = %err, "persisted favorites are corrupt, starting empty");
                    HashSet::new()
                }
            },
            Ok(None) => HashSet::new(),
            Err(err) => {
                warn!(error = %err, "could not read persisted favorites, starting empty");
                HashSet::new()
            }
        };
        Self { ids, store }
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &HashSet<u32> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flip membership of one id and write the set through. Returns
    /// whether the id is a favorite afterwards.
    pub fn toggle(&mut self, id: u32) -> bool {
        let now_favorite = if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };
        self.persist();
        now_favorite
    }

    fn persist(&self) {
        let mut sorted: Vec<u32> = self.ids.iter().copied().collect();
        sorted.sort_unstable();
        let encoded = match serde_json::to_string(&sorted) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(error = %err, "could not encode favorites");
                return;
            }
        };
        if let Err(err) = self.store.set(FAVORITES_KEY, &encoded) {
            warn!(error = %err, "could not persist favorites, keeping in-memory set");
        }
    }
}
