//! Messages spawned tasks send back to the event loop.

use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{CatalogSnapshot, EntryDetails, SpeciesProfile};

/// Results arrive in completion order; each variant carries everything the
/// handler needs to apply it. Detail-family variants carry the interest
/// scope they were spawned under so stale results can be told apart from
/// current ones.
#[derive(Debug, Clone)]
pub enum AppMessage {
    CatalogLoaded(Arc<CatalogSnapshot>),
    CatalogLoadFailed(String),
    /// The shared snapshot was replaced out of band (type tags resolved
    /// from a detail fetch).
    CatalogUpdated(Arc<CatalogSnapshot>),

    DetailsLoaded {
        scope: u64,
        id: u32,
        details: Box<EntryDetails>,
    },
    DetailsFailed {
        scope: u64,
        id: u32,
        error: String,
    },
    SpeciesLoaded {
        scope: u64,
        id: u32,
        profile: Box<SpeciesProfile>,
    },
    SpeciesFailed {
        scope: u64,
        id: u32,
        error: String,
    },
    LineageLoaded {
        scope: u64,
        id: u32,
        lineage: Vec<u32>,
    },
    /// The detail task finished all its parts; the id may be fetched
    /// again.
    DetailFetchSettled { id: u32 },

    TypeMembersLoaded {
        tag: String,
        members: HashSet<String>,
    },
    TypeMembersFailed {
        tag: String,
        error: String,
    },
}
