//! Catalog snapshot cache.
//!
//! Read path: in-memory snapshot, then the persisted snapshot if still
//! inside its TTL, then a network fetch. The fetch result is persisted and
//! kept in memory for the rest of the session.
//!
//! The snapshot slot is an async mutex held across the whole read path, so
//! concurrent callers that miss coalesce onto a single network fetch; the
//! holders queued behind it return the freshly stored snapshot without
//! issuing their own request.

mod details;
mod type_sets;

pub use details::DetailCache;
pub use type_sets::TypeSetCache;

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::api::{ApiError, PokeApiClient};
use crate::models::{CatalogSnapshot, SNAPSHOT_TTL_HOURS};
use crate::storage::{KeyValueStore, SNAPSHOT_KEY};

pub struct CatalogCache {
    store: Arc<dyn KeyValueStore>,
    snapshot: Mutex<Option<Arc<CatalogSnapshot>>>,
}

impl CatalogCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            snapshot: Mutex::new(None),
        }
    }

    /// Current in-memory snapshot, if the session has one.
    pub async fn current(&self) -> Option<Arc<CatalogSnapshot>> {
        self.snapshot.lock().await.clone()
    }

    /// Serve the catalog from memory, the persisted snapshot, or the
    /// network, in that order.
    pub async fn get_or_fetch(
        &self,
        client: &PokeApiClient,
    ) -> Result<Arc<CatalogSnapshot>, ApiError> {
        let mut slot = self.snapshot.lock().await;
        if let Some(snapshot) = slot.as_ref() {
            return Ok(Arc::clone(snapshot));
        }
        if let Some(persisted) = self.load_persisted() {
            if persisted.is_fresh() {
                debug!(
                    entries = persisted.entries.len(),
                    "adopted persisted catalog snapshot"
                );
                let snapshot = Arc::new(persisted);
                *slot = Some(Arc::clone(&snapshot));
                return Ok(snapshot);
            }
            debug!(
                ttl_hours = SNAPSHOT_TTL_HOURS,
                "persisted catalog snapshot expired, refetching"
            );
        }
        let entries = client.fetch_catalog().await?;
        let snapshot = Arc::new(CatalogSnapshot::new(entries));
        self.persist(&snapshot);
        *slot = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Drop both the in-memory and persisted snapshot so the next read
    /// refetches.
    pub async fn invalidate(&self) {
        let mut slot = self.snapshot.lock().await;
        *slot = None;
        if let Err(err) = self.store.remove(SNAPSHOT_KEY) {
            warn!(error = %err, "could not remove persisted catalog snapshot");
        }
    }

    /// Fill in the type tags of one entry, replacing the stored snapshot
    /// with an updated copy. Returns the new snapshot, or `None` when
    /// nothing changed (no snapshot, unknown id, or types already set).
    ///
    /// The capture timestamp is kept: resolving tags enriches the snapshot
    /// without restarting its TTL. The updated copy is not re-persisted;
    /// the next session resolves again from its own fetches.
    pub async fn resolve_types(&self, id: u32, types: &[String]) -> Option<Arc<CatalogSnapshot>> {
        if types.is_empty() {
            return None;
        }
        let mut slot = self.snapshot.lock().await;
        let current = slot.as_ref()?;
        let idx = current
            .entries
            .binary_search_by_key(&id, |entry| entry.id)
            .ok()?;
        if !current.entries[idx].types.is_empty() {
            return None;
        }
        let mut entries = current.entries.clone();
        entries[idx].types = types.to_vec();
        let updated = Arc::new(CatalogSnapshot::with_timestamp(entries, current.captured_at));
        *slot = Some(Arc::clone(&updated));
        Some(updated)
    }

    fn load_persisted(&self) -> Option<CatalogSnapshot> {
        let raw = match self.store.get(SNAPSHOT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "could not read persisted catalog snapshot");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(error = %err, "persisted catalog snapshot is corrupt, ignoring");
                None
            }
        }
    }

    fn persist(&self, snapshot: &CatalogSnapshot) {
        let encoded = match serde_json::to_string(snapshot) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(error = %err, "could not encode catalog snapshot");
                return;
            }
        };
        if let Err(err) = self.store.set(SNAPSHOT_KEY, &encoded) {
            warn!(error = %err, "could not persist catalog snapshot");
        }
    }
}
