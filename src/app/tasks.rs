//! Background fetch tasks.
//!
//! Each spawn clones the Arcs and the message sender, does its network
//! work off the event loop, and reports back with messages. Send failures
//! are ignored: the receiver only closes on shutdown.

use std::sync::Arc;

use tracing::debug;

use crate::app::{App, AppMessage};

impl App {
    pub(crate) fn spawn_catalog_load(&self, force: bool) {
        let cache = Arc::clone(&self.cache);
        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            if force {
                cache.invalidate().await;
            }
            match cache.get_or_fetch(&client).await {
                Ok(snapshot) => {
                    let _ = tx.send(AppMessage::CatalogLoaded(snapshot));
                }
                Err(err) => {
                    let _ = tx.send(AppMessage::CatalogLoadFailed(err.to_string()));
                }
            }
        });
    }

    /// Fetch whatever detail parts are missing for `id`. Already-cached
    /// parts are skipped; a fetch already in flight makes this a no-op.
    pub(crate) fn spawn_detail_fetch(&mut self, id: u32) {
        if !self.details.needs_fetch(id) {
            return;
        }
        self.details.begin_fetch(id);
        let scope = self.detail_scope;
        let need_details = !self.details.has_details(id);
        let need_species = !self.details.has_species(id);
        let have_lineage = self.details.has_lineage(id);
        let known_chain_url = self
            .details
            .species(id)
            .and_then(|p| p.evolution_chain_url.clone());
        let client = Arc::clone(&self.client);
        let cache = Arc::clone(&self.cache);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let key = id.to_string();
            let mut chain_url = known_chain_url;
            if need_details {
                match client.fetch_entry_details(&key).await {
                    Ok(details) => {
                        // The detail payload knows the entry's types; feed
                        // them back into the shared snapshot if it was
                        // still unresolved there.
                        if let Some(snapshot) = cache.resolve_types(id, &details.types).await {
                            let _ = tx.send(AppMessage::CatalogUpdated(snapshot));
                        }
                        let _ = tx.send(AppMessage::DetailsLoaded {
                            scope,
                            id,
                            details: Box::new(details),
                        });
                    }
                    Err(err) => {
                        let _ = tx.send(AppMessage::DetailsFailed {
                            scope,
                            id,
                            error: err.to_string(),
                        });
                    }
                }
            }
            if need_species {
                match client.fetch_species(&key).await {
                    Ok(profile) => {
                        chain_url = profile.evolution_chain_url.clone();
                        let _ = tx.send(AppMessage::SpeciesLoaded {
                            scope,
                            id,
                            profile: Box::new(profile),
                        });
                    }
                    Err(err) => {
                        let _ = tx.send(AppMessage::SpeciesFailed {
                            scope,
                            id,
                            error: err.to_string(),
                        });
                    }
                }
            }
            if !have_lineage {
                if let Some(url) = chain_url {
                    match client.fetch_evolution_chain(&url).await {
                        Ok(lineage) => {
                            let _ = tx.send(AppMessage::LineageLoaded { scope, id, lineage });
                        }
                        Err(err) => {
                            // Lineage is decoration on the detail screen;
                            // its absence is not an error state.
                            debug!(id, error = %err, "evolution chain fetch failed");
                        }
                    }
                }
            }
            let _ = tx.send(AppMessage::DetailFetchSettled { id });
        });
    }

    pub(crate) fn spawn_type_members_fetch(&self, tag: String) {
        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            match client.fetch_type_members(&tag).await {
                Ok(members) => {
                    let _ = tx.send(AppMessage::TypeMembersLoaded { tag, members });
                }
                Err(err) => {
                    let _ = tx.send(AppMessage::TypeMembersFailed {
                        tag,
                        error: err.to_string(),
                    });
                }
            }
        });
    }
}
