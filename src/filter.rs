//! Filtering, search, and pagination over a catalog snapshot.
//!
//! The engine is a pure function: given the snapshot, the criteria, the
//! favorite set, and the type membership cache, it returns the matching
//! entry indices in catalog order plus the clamped page window. All state
//! changes recompute the view from scratch; nothing here is incremental.

use std::collections::{BTreeSet, HashSet};
use std::ops::Range;

use crate::cache::TypeSetCache;
use crate::models::CatalogEntry;

/// Entries shown per page.
pub const PAGE_SIZE: usize = 24;

/// Quiet time after the last keystroke before a search commits.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Width of the page-number strip.
const MAX_VISIBLE_PAGES: usize = 5;

/// Active filter criteria. All populated criteria must match at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: String,
    pub types: BTreeSet<String>,
    pub generation: Option<u32>,
    pub favorites_only: bool,
}

impl FilterCriteria {
    /// Whether any criterion would narrow the catalog.
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
            || !self.types.is_empty()
            || self.generation.is_some()
            || self.favorites_only
    }

    /// Flip one type tag in or out of the selection. Returns whether the
    /// tag is selected afterwards.
    pub fn toggle_type(&mut self, tag: &str) -> bool {
        if self.types.remove(tag) {
            false
        } else {
            self.types.insert(tag.to_string());
            true
        }
    }
}

/// One page of a filtered result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewWindow {
    /// Current page, clamped to `[1, max(1, total_pages)]`.
    pub page: usize,
    /// `ceil(filtered_count / PAGE_SIZE)`; zero when nothing matched.
    pub total_pages: usize,
    pub filtered_count: usize,
}

impl ViewWindow {
    /// Index range of this page within the filtered list.
    pub fn page_range(&self) -> Range<usize> {
        let start = (self.page - 1).saturating_mul(PAGE_SIZE).min(self.filtered_count);
        let end = (start + PAGE_SIZE).min(self.filtered_count);
        start..end
    }
}

/// Filter result: indices into the snapshot's entry list, in catalog
/// order, plus the page window over them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView {
    pub indices: Vec<usize>,
    pub window: ViewWindow,
}

impl Default for FilteredView {
    fn default() -> Self {
        Self {
            indices: Vec::new(),
            window: ViewWindow {
                page: 1,
                total_pages: 0,
                filtered_count: 0,
            },
        }
    }
}

impl FilteredView {
    /// The slice of indices belonging to the current page.
    pub fn page_indices(&self) -> &[usize] {
        &self.indices[self.window.page_range()]
    }
}

/// Apply the criteria to the catalog and page the result.
///
/// `requested_page` may be stale (criteria just changed); it is clamped
/// into the valid range rather than rejected.
pub fn compute_view(
    catalog: &[CatalogEntry],
    criteria: &FilterCriteria,
    favorites: &HashSet<u32>,
    type_sets: &TypeSetCache,
    requested_page: usize,
) -> FilteredView {
    let query = criteria.query.trim().to_lowercase();
    let indices: Vec<usize> = catalog
        .iter()
        .enumerate()
        .filter(|(_, entry)| {
            if criteria.favorites_only && !favorites.contains(&entry.id) {
                return false;
            }
            if let Some(generation) = criteria.generation {
                if entry.generation != Some(generation) {
                    return false;
                }
            }
            if !query.is_empty() && !matches_query(entry, &query) {
                return false;
            }
            if !criteria.types.is_empty() && !matches_types(entry, &criteria.types, type_sets) {
                return false;
            }
            true
        })
        .map(|(idx, _)| idx)
        .collect();

    let filtered_count = indices.len();
    let total_pages = filtered_count.div_ceil(PAGE_SIZE);
    let page = requested_page.clamp(1, total_pages.max(1));
    FilteredView {
        indices,
        window: ViewWindow {
            page,
            total_pages,
            filtered_count,
        },
    }
}

/// Case-insensitive substring match on canonical and localized names,
/// plus an exact match on the decimal id.
fn matches_query(entry: &CatalogEntry, query: &str) -> bool {
    if entry.name.contains(query) {
        return true;
    }
    if let Some(local) = &entry.local_name {
        if local.to_lowercase().contains(query) {
            return true;
        }
    }
    entry.id.to_string() == query
}

/// Every selected tag must match. Entries with resolved types check their
/// own tag list; unresolved entries fall back to the fetched membership
/// sets and are excluded while a set is still missing.
fn matches_types(entry: &CatalogEntry, selected: &BTreeSet<String>, type_sets: &TypeSetCache) -> bool {
    if !entry.types.is_empty() {
        return selected
            .iter()
            .all(|tag| entry.types.iter().any(|t| t == tag));
    }
    selected.iter().all(|tag| {
        type_sets
            .members(tag)
            .is_some_and(|members| members.contains(&entry.name))
    })
}

/// Page numbers to show in the pagination strip: a window of up to
/// [`MAX_VISIBLE_PAGES`] numbers centered on the current page and pinned
/// to the ends of the range.
pub fn page_numbers(window: &ViewWindow) -> Vec<usize> {
    let total = window.total_pages;
    if total == 0 {
        return Vec::new();
    }
    let mut start = window.page.saturating_sub(MAX_VISIBLE_PAGES / 2).max(1);
    let end = (start + MAX_VISIBLE_PAGES - 1).min(total);
    if end + 1 - start < MAX_VISIBLE_PAGES {
        start = end.saturating_sub(MAX_VISIBLE_PAGES - 1).max(1);
    }
    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, name: &str, types: &[&str]) -> CatalogEntry {
        CatalogEntry {
            id,
            name: name.to_string(),
            local_name: None,
            types: types.iter().map(|t| t.to_string()).collect(),
            generation: Some(1),
        }
    }

    fn starter_catalog() -> Vec<CatalogEntry> {
        vec![
            entry(1, "bulbasaur", &["grass", "poison"]),
            entry(4, "charmander", &["fire"]),
            entry(7, "squirtle", &["water"]),
        ]
    }

    #[test]
    fn test_no_criteria_passes_everything_through() {
        let catalog = starter_catalog();
        let view = compute_view(
            &catalog,
            &FilterCriteria::default(),
            &HashSet::new(),
            &TypeSetCache::new(),
            1,
        );
        assert_eq!(view.indices, vec![0, 1, 2]);
        assert_eq!(view.window.total_pages, 1);
        assert_eq!(view.page_indices(), &[0, 1, 2]);
    }

    #[test]
    fn test_type_filter_keeps_only_matching_entries() {
        let catalog = starter_catalog();
        let mut criteria = FilterCriteria::default();
        criteria.toggle_type("fire");
        let view = compute_view(&catalog, &criteria, &HashSet::new(), &TypeSetCache::new(), 1);
        assert_eq!(view.indices.len(), 1);
        assert_eq!(catalog[view.indices[0]].id, 4);
    }

    #[test]
    fn test_numeric_query_matches_exact_id_only() {
        let catalog = starter_catalog();
        let criteria = FilterCriteria {
            query: "4".to_string(),
            ..Default::default()
        };
        let view = compute_view(&catalog, &criteria, &HashSet::new(), &TypeSetCache::new(), 1);
        assert_eq!(view.indices.len(), 1);
        assert_eq!(catalog[view.indices[0]].id, 4);
    }

    #[test]
    fn test_favorites_only_restricts_to_favorite_set() {
        let catalog = starter_catalog();
        let criteria = FilterCriteria {
            favorites_only: true,
            ..Default::default()
        };
        let favorites = HashSet::from([1]);
        let view = compute_view(&catalog, &criteria, &favorites, &TypeSetCache::new(), 1);
        assert_eq!(view.indices.len(), 1);
        assert_eq!(catalog[view.indices[0]].id, 1);
    }

    #[test]
    fn test_query_trims_and_ignores_case() {
        let catalog = starter_catalog();
        let criteria = FilterCriteria {
            query: "  CHAR  ".to_string(),
            ..Default::default()
        };
        let view = compute_view(&catalog, &criteria, &HashSet::new(), &TypeSetCache::new(), 1);
        assert_eq!(view.indices.len(), 1);
        assert_eq!(catalog[view.indices[0]].name, "charmander");
    }

    #[test]
    fn test_query_matches_localized_name() {
        let mut catalog = starter_catalog();
        catalog[1].local_name = Some("파이리".to_string());
        let criteria = FilterCriteria {
            query: "파이".to_string(),
            ..Default::default()
        };
        let view = compute_view(&catalog, &criteria, &HashSet::new(), &TypeSetCache::new(), 1);
        assert_eq!(view.indices, vec![1]);
    }

    #[test]
    fn test_result_preserves_catalog_order() {
        let catalog = starter_catalog();
        let criteria = FilterCriteria {
            query: "a".to_string(),
            ..Default::default()
        };
        let view = compute_view(&catalog, &criteria, &HashSet::new(), &TypeSetCache::new(), 1);
        let ids: Vec<u32> = view.indices.iter().map(|&i| catalog[i].id).collect();
        assert_eq!(ids, vec![1, 4, 7]);
    }

    #[test]
    fn test_conjunction_of_criteria() {
        let mut catalog = starter_catalog();
        catalog[2].generation = Some(2);
        let mut criteria = FilterCriteria {
            favorites_only: true,
            generation: Some(1),
            query: "a".to_string(),
            ..Default::default()
        };
        criteria.toggle_type("fire");
        let favorites = HashSet::from([1, 4, 7]);
        let view = compute_view(&catalog, &criteria, &favorites, &TypeSetCache::new(), 1);
        let ids: Vec<u32> = view.indices.iter().map(|&i| catalog[i].id).collect();
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn test_unresolved_entry_uses_membership_set() {
        let mut catalog = starter_catalog();
        catalog[1].types.clear();
        let mut criteria = FilterCriteria::default();
        criteria.toggle_type("fire");

        // Membership not fetched yet: unresolved entry is excluded.
        let view = compute_view(&catalog, &criteria, &HashSet::new(), &TypeSetCache::new(), 1);
        assert!(view.indices.is_empty());

        // Once fetched, the same entry matches.
        let mut sets = TypeSetCache::new();
        sets.insert(
            "fire".to_string(),
            HashSet::from(["charmander".to_string()]),
        );
        let view = compute_view(&catalog, &criteria, &HashSet::new(), &sets, 1);
        assert_eq!(view.indices, vec![1]);
    }

    #[test]
    fn test_pagination_window_math() {
        let catalog: Vec<CatalogEntry> = (1..=50)
            .map(|id| entry(id, &format!("species-{id}"), &[]))
            .collect();
        let view = compute_view(&catalog, &FilterCriteria::default(), &HashSet::new(), &TypeSetCache::new(), 3);
        assert_eq!(view.window.total_pages, 3);
        assert_eq!(view.window.page, 3);
        assert_eq!(view.window.page_range(), 48..50);
        assert_eq!(view.page_indices().len(), 2);
    }

    #[test]
    fn test_page_clamped_into_valid_range() {
        let catalog: Vec<CatalogEntry> = (1..=50)
            .map(|id| entry(id, &format!("species-{id}"), &[]))
            .collect();
        let high = compute_view(&catalog, &FilterCriteria::default(), &HashSet::new(), &TypeSetCache::new(), 99);
        assert_eq!(high.window.page, 3);
        let low = compute_view(&catalog, &FilterCriteria::default(), &HashSet::new(), &TypeSetCache::new(), 0);
        assert_eq!(low.window.page, 1);
    }

    #[test]
    fn test_empty_result_clamps_page_to_one() {
        let catalog = starter_catalog();
        let criteria = FilterCriteria {
            query: "zzz".to_string(),
            ..Default::default()
        };
        let view = compute_view(&catalog, &criteria, &HashSet::new(), &TypeSetCache::new(), 7);
        assert_eq!(view.window.total_pages, 0);
        assert_eq!(view.window.page, 1);
        assert!(view.page_indices().is_empty());
    }

    #[test]
    fn test_exact_page_boundary_has_no_phantom_page() {
        let catalog: Vec<CatalogEntry> = (1..=48)
            .map(|id| entry(id, &format!("species-{id}"), &[]))
            .collect();
        let view = compute_view(&catalog, &FilterCriteria::default(), &HashSet::new(), &TypeSetCache::new(), 2);
        assert_eq!(view.window.total_pages, 2);
        assert_eq!(view.window.page_range(), 24..48);
    }

    #[test]
    fn test_page_numbers_window_centers_and_pins() {
        let window = |page, total_pages| ViewWindow {
            page,
            total_pages,
            filtered_count: total_pages * PAGE_SIZE,
        };
        assert_eq!(page_numbers(&window(1, 10)), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_numbers(&window(6, 10)), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_numbers(&window(10, 10)), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_numbers(&window(1, 3)), vec![1, 2, 3]);
        assert_eq!(page_numbers(&window(1, 0)), Vec::<usize>::new());
    }
}
