//! UI rendering.
//!
//! Two screens: the paged listing with its search box and type filter row,
//! and the per-entry detail view. Render functions take `&App` and draw
//! into the frame; they never mutate state.

mod detail;
mod helpers;
mod listing;
mod theme;

pub use helpers::{pad_to_width, spinner_frame, stat_bar, truncate_to_width, SPINNER_FRAMES};
pub use theme::{palette, type_color, Palette, DARK, LIGHT};

use ratatui::Frame;

use crate::app::{App, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Listing => listing::render_listing(frame, app),
        Screen::Detail => detail::render_detail(frame, app),
    }
}
