//! Application state and event handling.
//!
//! All mutation happens on the event loop: key events and task completion
//! messages are applied one at a time, each applied message replaces whole
//! values (a snapshot Arc, a recomputed view), and the dirty flag drives
//! the next draw.

mod handlers;
mod messages;
mod tasks;
mod types;

pub use messages::AppMessage;
pub use types::{App, Focus, Screen};

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::filter::{self, FilterCriteria, FilteredView, SEARCH_DEBOUNCE_MS};
use crate::models::{CatalogEntry, KNOWN_TYPES};

impl App {
    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Periodic housekeeping: advance the spinner and commit a quiet
    /// search box.
    pub fn tick(&mut self) {
        self.tick_count += 1;
        self.check_search_debounce();
        if self.catalog_loading || self.detail_loading_visible() {
            self.mark_dirty();
        }
    }

    fn detail_loading_visible(&self) -> bool {
        self.screen == Screen::Detail
            && self.detail_id.is_some_and(|id| self.details.is_pending(id))
    }

    // ==== Catalog ====

    /// Kick off a catalog load unless one is already running. `force`
    /// drops the cached snapshot first.
    pub fn reload_catalog(&mut self, force: bool) {
        if self.catalog_loading {
            return;
        }
        self.catalog_loading = true;
        self.catalog_error = None;
        self.spawn_catalog_load(force);
        self.mark_dirty();
    }

    // ==== Search ====

    pub fn push_search_char(&mut self, c: char) {
        self.pending_query.push(c);
        self.last_query_change = Some(Instant::now());
        self.mark_dirty();
    }

    pub fn pop_search_char(&mut self) {
        if self.pending_query.pop().is_some() {
            self.last_query_change = Some(Instant::now());
            self.mark_dirty();
        }
    }

    /// Commit the pending query once it has been quiet long enough.
    /// Returns whether a commit happened on this call.
    pub fn check_search_debounce(&mut self) -> bool {
        let Some(changed_at) = self.last_query_change else {
            return false;
        };
        if changed_at.elapsed() < Duration::from_millis(SEARCH_DEBOUNCE_MS) {
            return false;
        }
        self.commit_search();
        true
    }

    /// Commit immediately, skipping the debounce window.
    pub fn commit_search_now(&mut self) {
        self.commit_search();
    }

    fn commit_search(&mut self) {
        self.last_query_change = None;
        if self.pending_query != self.criteria.query {
            self.criteria.query = self.pending_query.clone();
            self.page = 1;
            self.selected = 0;
            self.recompute_view();
        }
        self.mark_dirty();
    }

    // ==== Criteria ====

    pub fn toggle_favorites_only(&mut self) {
        self.criteria.favorites_only = !self.criteria.favorites_only;
        self.page = 1;
        self.selected = 0;
        self.recompute_view();
    }

    /// Step the generation filter: off, 1, 2, ... max, off. Does nothing
    /// while no entry carries a generation.
    pub fn cycle_generation(&mut self) {
        let Some(max) = self.catalog.as_ref().and_then(|c| c.max_generation()) else {
            return;
        };
        self.criteria.generation = match self.criteria.generation {
            None => Some(1),
            Some(g) if g >= max => None,
            Some(g) => Some(g + 1),
        };
        self.page = 1;
        self.selected = 0;
        self.recompute_view();
    }

    /// Toggle the type tag under the cursor. Selecting a tag while the
    /// catalog still has unresolved entries starts a membership fetch for
    /// it, once per session.
    pub fn toggle_type_at_cursor(&mut self) {
        let tag = KNOWN_TYPES[self.type_cursor.min(KNOWN_TYPES.len() - 1)];
        let now_selected = self.criteria.toggle_type(tag);
        self.page = 1;
        self.selected = 0;
        self.recompute_view();
        if now_selected {
            self.maybe_fetch_type_members(tag);
        }
    }

    fn maybe_fetch_type_members(&mut self, tag: &str) {
        let has_unresolved = self
            .catalog
            .as_ref()
            .is_some_and(|c| c.has_unresolved_types());
        if has_unresolved && self.type_sets.begin_fetch(tag) {
            self.spawn_type_members_fetch(tag.to_string());
        }
    }

    /// Drop every active criterion at once.
    pub fn clear_filters(&mut self) {
        if !self.criteria.is_active() && self.pending_query.is_empty() {
            return;
        }
        self.criteria = FilterCriteria::default();
        self.pending_query.clear();
        self.last_query_change = None;
        self.page = 1;
        self.selected = 0;
        self.recompute_view();
    }

    // ==== View ====

    /// Rebuild the filtered view from current state. The requested page is
    /// clamped by the engine and written back, so `self.page` always names
    /// a real page afterwards.
    pub fn recompute_view(&mut self) {
        match &self.catalog {
            Some(catalog) => {
                self.view = filter::compute_view(
                    &catalog.entries,
                    &self.criteria,
                    self.favorites.ids(),
                    &self.type_sets,
                    self.page,
                );
                self.page = self.view.window.page;
            }
            None => {
                self.view = FilteredView::default();
                self.page = 1;
            }
        }
        let len = self.view.page_indices().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        self.mark_dirty();
    }

    /// Entries of the current page, in catalog order.
    pub fn page_entries(&self) -> Vec<&CatalogEntry> {
        match &self.catalog {
            Some(catalog) => self
                .view
                .page_indices()
                .iter()
                .map(|&idx| &catalog.entries[idx])
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        let catalog = self.catalog.as_ref()?;
        let idx = *self.view.page_indices().get(self.selected)?;
        catalog.entries.get(idx)
    }

    pub fn select_next(&mut self) {
        let len = self.view.page_indices().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
            self.mark_dirty();
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.mark_dirty();
        }
    }

    pub fn next_page(&mut self) {
        if self.page < self.view.window.total_pages {
            self.page += 1;
            self.selected = 0;
            self.recompute_view();
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
            self.selected = 0;
            self.recompute_view();
        }
    }

    // ==== Favorites and preferences ====

    pub fn toggle_selected_favorite(&mut self) {
        if let Some(entry) = self.selected_entry() {
            let id = entry.id;
            self.toggle_favorite(id);
        }
    }

    /// Favorite toggles never reset the page; the view is recomputed so a
    /// favorites-only listing reflects the change immediately.
    pub fn toggle_favorite(&mut self, id: u32) {
        self.favorites.toggle(id);
        self.recompute_view();
    }

    pub fn toggle_language(&mut self) {
        self.prefs.toggle_language();
        self.mark_dirty();
    }

    pub fn toggle_theme(&mut self) {
        self.prefs.toggle_theme();
        self.mark_dirty();
    }

    // ==== Detail screen ====

    pub fn open_selected_detail(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        let id = entry.id;
        self.detail_id = Some(id);
        self.detail_scope += 1;
        self.detail_error = None;
        self.screen = Screen::Detail;
        self.spawn_detail_fetch(id);
        self.mark_dirty();
    }

    /// Leave the detail screen. The scope bump means in-flight results for
    /// the closed view are no longer applied to it; they still land in the
    /// session caches when they arrive.
    pub fn close_detail(&mut self) {
        self.screen = Screen::Listing;
        self.detail_id = None;
        self.detail_error = None;
        self.detail_scope += 1;
        self.mark_dirty();
    }

    // ==== Message application ====

    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::CatalogLoaded(snapshot) => {
                self.catalog_loading = false;
                self.catalog_error = None;
                self.catalog = Some(snapshot);
                self.recompute_view();
            }
            AppMessage::CatalogLoadFailed(error) => {
                self.catalog_loading = false;
                self.catalog_error = Some(error);
                self.mark_dirty();
            }
            AppMessage::CatalogUpdated(snapshot) => {
                self.catalog = Some(snapshot);
                self.recompute_view();
            }
            AppMessage::DetailsLoaded { scope, id, details } => {
                self.details.insert_details(*details);
                if scope == self.detail_scope {
                    self.mark_dirty();
                } else {
                    debug!(id, "detail result arrived after its view closed");
                }
            }
            AppMessage::DetailsFailed { scope, id, error } => {
                if scope == self.detail_scope {
                    self.detail_error = Some(error);
                    self.mark_dirty();
                } else {
                    debug!(id, %error, "stale detail failure ignored");
                }
            }
            AppMessage::SpeciesLoaded { scope, profile, .. } => {
                self.details.insert_species(*profile);
                if scope == self.detail_scope {
                    self.mark_dirty();
                }
            }
            AppMessage::SpeciesFailed { scope, id, error } => {
                debug!(id, %error, "species fetch failed, flavor text unavailable");
                if scope == self.detail_scope {
                    self.mark_dirty();
                }
            }
            AppMessage::LineageLoaded { scope, id, lineage } => {
                self.details.insert_lineage(id, lineage);
                if scope == self.detail_scope {
                    self.mark_dirty();
                }
            }
            AppMessage::DetailFetchSettled { id } => {
                self.details.finish_fetch(id);
            }
            AppMessage::TypeMembersLoaded { tag, members } => {
                debug!(%tag, count = members.len(), "type membership resolved");
                self.type_sets.insert(tag, members);
                self.recompute_view();
            }
            AppMessage::TypeMembersFailed { tag, error } => {
                warn!(%tag, %error, "type membership fetch failed");
                self.type_sets.abandon(&tag);
                self.mark_dirty();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PokeApiClient;
    use crate::cache::CatalogCache;
    use crate::favorites::FavoritesStore;
    use crate::models::CatalogSnapshot;
    use crate::prefs::PrefsStore;
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::collections::HashSet;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn entry(id: u32, name: &str, types: &[&str]) -> CatalogEntry {
        CatalogEntry {
            id,
            name: name.to_string(),
            local_name: None,
            types: types.iter().map(|t| t.to_string()).collect(),
            generation: Some(if id <= 151 { 1 } else { 2 }),
        }
    }

    fn test_app() -> (App, mpsc::UnboundedReceiver<AppMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let store = Arc::new(MemoryStore::new());
        let client = Arc::new(PokeApiClient::with_base_urls(
            "http://127.0.0.1:9".to_string(),
            "http://127.0.0.1:9".to_string(),
        ));
        let cache = Arc::new(CatalogCache::new(store.clone() as Arc<dyn KeyValueStore>));
        let favorites = FavoritesStore::load(store.clone() as Arc<dyn KeyValueStore>);
        let prefs = PrefsStore::load(store as Arc<dyn KeyValueStore>);
        (App::new(client, cache, favorites, prefs, tx), rx)
    }

    fn app_with_entries(entries: Vec<CatalogEntry>) -> (App, mpsc::UnboundedReceiver<AppMessage>) {
        let (mut app, rx) = test_app();
        app.handle_message(AppMessage::CatalogLoaded(Arc::new(CatalogSnapshot::new(
            entries,
        ))));
        (app, rx)
    }

    fn big_catalog(count: u32) -> Vec<CatalogEntry> {
        (1..=count)
            .map(|id| entry(id, &format!("species-{id}"), &["normal"]))
            .collect()
    }

    fn force_debounce_elapsed(app: &mut App) {
        app.last_query_change =
            Some(Instant::now() - Duration::from_millis(SEARCH_DEBOUNCE_MS + 50));
    }

    #[test]
    fn test_catalog_loaded_populates_view() {
        let (app, _rx) = app_with_entries(vec![
            entry(1, "bulbasaur", &["grass", "poison"]),
            entry(4, "charmander", &["fire"]),
        ]);
        assert!(!app.catalog_loading);
        assert_eq!(app.view.window.filtered_count, 2);
        assert_eq!(app.page_entries().len(), 2);
    }

    #[test]
    fn test_typing_does_not_filter_until_commit() {
        let (mut app, _rx) = app_with_entries(vec![
            entry(1, "bulbasaur", &[]),
            entry(4, "charmander", &[]),
        ]);
        app.push_search_char('c');
        assert_eq!(app.criteria.query, "");
        assert_eq!(app.view.window.filtered_count, 2);
        assert!(!app.check_search_debounce());

        force_debounce_elapsed(&mut app);
        assert!(app.check_search_debounce());
        assert_eq!(app.criteria.query, "c");
        assert_eq!(app.view.window.filtered_count, 1);
    }

    #[test]
    fn test_commit_resets_page_only_when_text_changed() {
        let (mut app, _rx) = app_with_entries(big_catalog(60));
        app.next_page();
        assert_eq!(app.page, 2);

        // Type and erase back to the committed text: page survives.
        app.push_search_char('x');
        app.pop_search_char();
        force_debounce_elapsed(&mut app);
        assert!(app.check_search_debounce());
        assert_eq!(app.page, 2);

        // A real change resets to page one.
        app.push_search_char('1');
        force_debounce_elapsed(&mut app);
        assert!(app.check_search_debounce());
        assert_eq!(app.page, 1);
    }

    #[test]
    fn test_enter_commits_without_waiting() {
        let (mut app, _rx) = app_with_entries(vec![
            entry(1, "bulbasaur", &[]),
            entry(4, "charmander", &[]),
        ]);
        app.push_search_char('b');
        app.commit_search_now();
        assert_eq!(app.criteria.query, "b");
        assert_eq!(app.view.window.filtered_count, 1);
    }

    #[test]
    fn test_favorites_only_resets_page_favorite_toggle_does_not() {
        let (mut app, _rx) = app_with_entries(big_catalog(60));
        app.next_page();
        assert_eq!(app.page, 2);
        app.toggle_favorite(30);
        assert_eq!(app.page, 2);

        app.toggle_favorites_only();
        assert_eq!(app.page, 1);
        assert_eq!(app.view.window.filtered_count, 1);
    }

    #[test]
    fn test_page_clamps_when_view_shrinks() {
        let (mut app, _rx) = app_with_entries(big_catalog(60));
        app.next_page();
        app.next_page();
        assert_eq!(app.page, 3);
        app.toggle_favorite(5);
        app.toggle_favorites_only();
        app.toggle_favorites_only();
        // Back to the full catalog: page was reset by the criteria change.
        assert_eq!(app.page, 1);

        // Shrink without a criteria change: favorites-only on page 1 with
        // one favorite, then unfavorite it.
        app.toggle_favorites_only();
        assert_eq!(app.view.window.filtered_count, 1);
        app.toggle_favorite(5);
        assert_eq!(app.view.window.filtered_count, 0);
        assert_eq!(app.page, 1);
    }

    #[test]
    fn test_cycle_generation_wraps_through_max() {
        let (mut app, _rx) = app_with_entries(vec![
            entry(1, "bulbasaur", &[]),
            entry(152, "chikorita", &[]),
        ]);
        assert_eq!(app.criteria.generation, None);
        app.cycle_generation();
        assert_eq!(app.criteria.generation, Some(1));
        app.cycle_generation();
        assert_eq!(app.criteria.generation, Some(2));
        app.cycle_generation();
        assert_eq!(app.criteria.generation, None);
    }

    #[test]
    fn test_cycle_generation_noop_without_generations() {
        let (mut app, _rx) = app_with_entries(vec![CatalogEntry {
            id: 1,
            name: "bulbasaur".to_string(),
            local_name: None,
            types: Vec::new(),
            generation: None,
        }]);
        app.cycle_generation();
        assert_eq!(app.criteria.generation, None);
    }

    #[test]
    fn test_selection_moves_within_page() {
        let (mut app, _rx) = app_with_entries(big_catalog(30));
        assert_eq!(app.selected, 0);
        app.select_previous();
        assert_eq!(app.selected, 0);
        app.select_next();
        assert_eq!(app.selected, 1);
        app.next_page();
        assert_eq!(app.selected, 0);
        // Second page has 6 entries; selection cannot run past the end.
        for _ in 0..10 {
            app.select_next();
        }
        assert_eq!(app.selected, 5);
    }

    #[test]
    fn test_stale_detail_failure_is_not_applied() {
        let (mut app, _rx) = app_with_entries(big_catalog(3));
        let stale_scope = app.detail_scope;
        app.detail_scope += 1;
        app.handle_message(AppMessage::DetailsFailed {
            scope: stale_scope,
            id: 1,
            error: "boom".to_string(),
        });
        assert!(app.detail_error.is_none());

        app.handle_message(AppMessage::DetailsFailed {
            scope: app.detail_scope,
            id: 1,
            error: "boom".to_string(),
        });
        assert_eq!(app.detail_error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_stale_detail_result_still_warms_cache() {
        let (mut app, _rx) = app_with_entries(big_catalog(3));
        let details = crate::models::EntryDetails {
            id: 2,
            name: "species-2".to_string(),
            types: vec!["normal".to_string()],
            height_m: 1.0,
            weight_kg: 10.0,
            abilities: Vec::new(),
            stats: Vec::new(),
            sprite_url: None,
        };
        app.handle_message(AppMessage::DetailsLoaded {
            scope: app.detail_scope.wrapping_sub(1),
            id: 2,
            details: Box::new(details),
        });
        assert!(app.details.has_details(2));
    }

    #[test]
    fn test_type_members_arrival_recomputes_view() {
        let mut entries = big_catalog(3);
        for e in &mut entries {
            e.types.clear();
        }
        let (mut app, _rx) = app_with_entries(entries);
        app.criteria.toggle_type("fire");
        app.recompute_view();
        assert_eq!(app.view.window.filtered_count, 0);

        app.handle_message(AppMessage::TypeMembersLoaded {
            tag: "fire".to_string(),
            members: HashSet::from(["species-2".to_string()]),
        });
        assert_eq!(app.view.window.filtered_count, 1);
    }

    #[tokio::test]
    async fn test_open_and_close_detail_manage_scope() {
        let (mut app, _rx) = app_with_entries(big_catalog(3));
        let scope_before = app.detail_scope;
        app.open_selected_detail();
        assert_eq!(app.screen, Screen::Detail);
        assert_eq!(app.detail_id, Some(1));
        assert_eq!(app.detail_scope, scope_before + 1);
        assert!(app.details.is_pending(1));

        app.close_detail();
        assert_eq!(app.screen, Screen::Listing);
        assert!(app.detail_id.is_none());
        assert_eq!(app.detail_scope, scope_before + 2);
    }

    #[tokio::test]
    async fn test_reopening_pending_detail_spawns_no_second_fetch() {
        let (mut app, _rx) = app_with_entries(big_catalog(3));
        app.open_selected_detail();
        assert!(app.details.is_pending(1));
        app.close_detail();
        app.open_selected_detail();
        // Still the one pending fetch; begin_fetch refused a duplicate.
        assert!(app.details.is_pending(1));
    }

    #[test]
    fn test_clear_filters_drops_everything() {
        let (mut app, _rx) = app_with_entries(big_catalog(60));
        app.criteria.favorites_only = true;
        app.criteria.generation = Some(1);
        app.criteria.toggle_type("normal");
        app.pending_query = "abc".to_string();
        app.criteria.query = "abc".to_string();
        app.clear_filters();
        assert!(!app.criteria.is_active());
        assert!(app.pending_query.is_empty());
        assert_eq!(app.view.window.filtered_count, 60);
    }
}
