//! App state container.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::api::PokeApiClient;
use crate::app::messages::AppMessage;
use crate::cache::{CatalogCache, DetailCache, TypeSetCache};
use crate::favorites::FavoritesStore;
use crate::filter::{FilterCriteria, FilteredView};
use crate::lang::Language;
use crate::models::CatalogSnapshot;
use crate::prefs::{PrefsStore, ThemeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Listing,
    Detail,
}

/// Which part of the listing screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    List,
    Search,
    Types,
}

/// The single owner of all mutable state. Spawned tasks never touch it;
/// they report back through the message channel and the event loop applies
/// results here in completion order.
pub struct App {
    pub client: Arc<PokeApiClient>,
    pub cache: Arc<CatalogCache>,
    pub catalog: Option<Arc<CatalogSnapshot>>,
    pub details: DetailCache,
    pub type_sets: TypeSetCache,
    pub favorites: FavoritesStore,
    pub prefs: PrefsStore,

    pub criteria: FilterCriteria,
    pub view: FilteredView,
    /// Requested page; normalized to the clamped value after recompute.
    pub page: usize,
    /// Selection offset within the current page.
    pub selected: usize,

    /// Search text being edited; becomes `criteria.query` once the
    /// debounce window passes.
    pub pending_query: String,
    pub last_query_change: Option<Instant>,

    pub screen: Screen,
    pub focus: Focus,
    /// Cursor position in the type filter row.
    pub type_cursor: usize,

    pub detail_id: Option<u32>,
    /// Interest token for detail fetches; results from older scopes are
    /// not applied to the view.
    pub detail_scope: u64,
    pub detail_error: Option<String>,

    pub catalog_loading: bool,
    pub catalog_error: Option<String>,

    pub should_quit: bool,
    pub needs_redraw: bool,
    pub tick_count: u64,

    pub message_tx: mpsc::UnboundedSender<AppMessage>,
}

impl App {
    pub fn new(
        client: Arc<PokeApiClient>,
        cache: Arc<CatalogCache>,
        favorites: FavoritesStore,
        prefs: PrefsStore,
        message_tx: mpsc::UnboundedSender<AppMessage>,
    ) -> Self {
        Self {
            client,
            cache,
            catalog: None,
            details: DetailCache::new(),
            type_sets: TypeSetCache::new(),
            favorites,
            prefs,
            criteria: FilterCriteria::default(),
            view: FilteredView::default(),
            page: 1,
            selected: 0,
            pending_query: String::new(),
            last_query_change: None,
            screen: Screen::default(),
            focus: Focus::default(),
            type_cursor: 0,
            detail_id: None,
            detail_scope: 0,
            detail_error: None,
            catalog_loading: false,
            catalog_error: None,
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            message_tx,
        }
    }

    pub fn language(&self) -> Language {
        self.prefs.language()
    }

    pub fn theme_kind(&self) -> ThemeKind {
        self.prefs.theme()
    }
}
