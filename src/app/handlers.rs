//! Key handling.
//!
//! Dispatch goes screen first, then focus within the listing screen. The
//! event loop already filtered to key presses.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Focus, Screen};
use crate::models::KNOWN_TYPES;

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }
        match self.screen {
            Screen::Listing => self.handle_listing_key(key),
            Screen::Detail => self.handle_detail_key(key),
        }
    }

    fn handle_listing_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Tab {
            self.cycle_focus();
            return;
        }
        match self.focus {
            Focus::Search => self.handle_search_key(key),
            Focus::Types => self.handle_types_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::List => Focus::Search,
            Focus::Search => Focus::Types,
            Focus::Types => Focus::List,
        };
        self.mark_dirty();
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.commit_search_now();
                self.focus = Focus::List;
            }
            KeyCode::Esc => {
                self.focus = Focus::List;
                self.mark_dirty();
            }
            KeyCode::Backspace => self.pop_search_char(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.push_search_char(c);
            }
            _ => {}
        }
    }

    fn handle_types_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.type_cursor = if self.type_cursor == 0 {
                    KNOWN_TYPES.len() - 1
                } else {
                    self.type_cursor - 1
                };
                self.mark_dirty();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.type_cursor = (self.type_cursor + 1) % KNOWN_TYPES.len();
                self.mark_dirty();
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_type_at_cursor(),
            KeyCode::Esc => {
                self.focus = Focus::List;
                self.mark_dirty();
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => self.prev_page(),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => self.next_page(),
            KeyCode::Enter => self.open_selected_detail(),
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.focus = Focus::Search;
                self.mark_dirty();
            }
            KeyCode::Char('t') => {
                self.focus = Focus::Types;
                self.mark_dirty();
            }
            KeyCode::Char('f') => self.toggle_selected_favorite(),
            KeyCode::Char('v') => self.toggle_favorites_only(),
            KeyCode::Char('g') => self.cycle_generation(),
            KeyCode::Char('L') => self.toggle_language(),
            KeyCode::Char('T') => self.toggle_theme(),
            KeyCode::Char('r') => self.reload_catalog(false),
            KeyCode::Char('R') => self.reload_catalog(true),
            KeyCode::Esc => self.clear_filters(),
            KeyCode::Char('q') => self.quit(),
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace | KeyCode::Char('h') => {
                self.close_detail();
            }
            KeyCode::Char('f') => {
                if let Some(id) = self.detail_id {
                    self.toggle_favorite(id);
                }
            }
            KeyCode::Char('L') => self.toggle_language(),
            KeyCode::Char('T') => self.toggle_theme(),
            _ => {}
        }
    }
}
