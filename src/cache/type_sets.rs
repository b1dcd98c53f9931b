//! Memo of type membership sets.
//!
//! Each set is fetched at most once per session, the first time its tag is
//! selected while the catalog still has entries with unresolved types.

use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct TypeSetCache {
    sets: HashMap<String, HashSet<String>>,
    pending: HashSet<String>,
}

impl TypeSetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Member names for a tag, if the set has been fetched.
    pub fn members(&self, tag: &str) -> Option<&HashSet<String>> {
        self.sets.get(tag)
    }

    pub fn has(&self, tag: &str) -> bool {
        self.sets.contains_key(tag)
    }

    pub fn is_pending(&self, tag: &str) -> bool {
        self.pending.contains(tag)
    }

    /// Mark a membership fetch as in flight. Returns false when the set is
    /// already cached or already being fetched.
    pub fn begin_fetch(&mut self, tag: &str) -> bool {
        if self.has(tag) || self.is_pending(tag) {
            return false;
        }
        self.pending.insert(tag.to_string());
        true
    }

    pub fn insert(&mut self, tag: String, members: HashSet<String>) {
        self.pending.remove(&tag);
        self.sets.insert(tag, members);
    }

    /// Drop the in-flight mark after a failed fetch so a later selection
    /// can try again.
    pub fn abandon(&mut self, tag: &str) {
        self.pending.remove(tag);
    }
}
