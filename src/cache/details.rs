//! Session memo of per-entry detail fetches.
//!
//! Results live for the whole session keyed by dex number; revisiting an
//! entry renders from here without touching the network. The pending set
//! keeps one in-flight fetch per id, so reopening an entry while its fetch
//! is still running does not spawn a duplicate.

use std::collections::{HashMap, HashSet};

use crate::models::{EntryDetails, SpeciesProfile};

#[derive(Debug, Default)]
pub struct DetailCache {
    details: HashMap<u32, EntryDetails>,
    species: HashMap<u32, SpeciesProfile>,
    lineages: HashMap<u32, Vec<u32>>,
    pending: HashSet<u32>,
}

impl DetailCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn details(&self, id: u32) -> Option<&EntryDetails> {
        self.details.get(&id)
    }

    pub fn species(&self, id: u32) -> Option<&SpeciesProfile> {
        self.species.get(&id)
    }

    pub fn lineage(&self, id: u32) -> Option<&[u32]> {
        self.lineages.get(&id).map(Vec::as_slice)
    }

    pub fn has_details(&self, id: u32) -> bool {
        self.details.contains_key(&id)
    }

    pub fn has_species(&self, id: u32) -> bool {
        self.species.contains_key(&id)
    }

    pub fn has_lineage(&self, id: u32) -> bool {
        self.lineages.contains_key(&id)
    }

    pub fn is_pending(&self, id: u32) -> bool {
        self.pending.contains(&id)
    }

    /// Whether a fetch should be spawned for this id: some part is still
    /// missing and no fetch is already in flight.
    pub fn needs_fetch(&self, id: u32) -> bool {
        !self.is_pending(id) && !(self.has_details(id) && self.has_species(id))
    }

    /// Mark a fetch as in flight. Returns false when one already is.
    pub fn begin_fetch(&mut self, id: u32) -> bool {
        self.pending.insert(id)
    }

    /// Clear the in-flight mark once the fetch settled, successfully or
    /// not.
    pub fn finish_fetch(&mut self, id: u32) {
        self.pending.remove(&id);
    }

    pub fn insert_details(&mut self, details: EntryDetails) {
        self.details.insert(details.id, details);
    }

    pub fn insert_species(&mut self, profile: SpeciesProfile) {
        self.species.insert(profile.id, profile);
    }

    pub fn insert_lineage(&mut self, id: u32, lineage: Vec<u32>) {
        self.lineages.insert(id, lineage);
    }
}
