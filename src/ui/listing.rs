//! Listing screen: header, search box, type filter row, the entry list,
//! and the pagination strip.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::{App, Focus};
use crate::filter::page_numbers;
use crate::lang::{self, Labels};
use crate::models::KNOWN_TYPES;
use crate::ui::helpers::{pad_to_width, spinner_frame, truncate_to_width};
use crate::ui::theme::{type_color, Palette};

const NAME_COLUMN_WIDTH: usize = 16;

pub fn render_listing(frame: &mut Frame, app: &App) {
    let palette = crate::ui::theme::palette(app.theme_kind());
    let labels = lang::labels(app.language());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, palette, labels, chunks[0]);
    render_search(frame, app, palette, labels, chunks[1]);
    render_type_row(frame, app, palette, chunks[2]);
    render_entries(frame, app, palette, labels, chunks[3]);
    render_pagination(frame, app, palette, labels, chunks[4]);
    render_footer(frame, app, palette, chunks[5]);
}

fn render_header(frame: &mut Frame, app: &App, palette: &Palette, labels: &Labels, area: Rect) {
    let mut spans: Vec<Span> = Vec::new();
    if let Some(catalog) = &app.catalog {
        spans.push(Span::styled(
            format!(
                "{}/{}",
                app.view.window.filtered_count,
                catalog.entries.len()
            ),
            Style::default().fg(palette.text),
        ));
    }
    if !app.favorites.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("♥ {}", app.favorites.len()),
            Style::default().fg(palette.favorite),
        ));
    }
    let generation_text = match app.criteria.generation {
        Some(g) => format!("{} {}", labels.generation_prefix, g),
        None => labels.all_generations.to_string(),
    };
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        generation_text,
        Style::default().fg(palette.dim),
    ));
    if app.criteria.favorites_only {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            labels.favorites_only,
            Style::default()
                .fg(palette.favorite)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if app.catalog_loading {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{} {}", spinner_frame(app.tick_count), labels.loading_catalog),
            Style::default().fg(palette.accent),
        ));
    } else if let Some(error) = &app.catalog_error {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!(
                "{} ({}) · {}",
                labels.catalog_failed,
                truncate_to_width(error, 40),
                labels.retry_hint
            ),
            Style::default().fg(palette.error),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(Span::styled(
            format!(" {} ", labels.title),
            Style::default()
                .fg(palette.header)
                .add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_search(frame: &mut Frame, app: &App, palette: &Palette, labels: &Labels, area: Rect) {
    let focused = app.focus == Focus::Search;
    let border = if focused { palette.accent } else { palette.border };
    let content = if app.pending_query.is_empty() && !focused {
        Line::from(Span::styled(
            labels.search_placeholder,
            Style::default().fg(palette.dim),
        ))
    } else {
        let mut spans = vec![Span::styled(
            app.pending_query.clone(),
            Style::default().fg(palette.text),
        )];
        if focused {
            spans.push(Span::styled("▌", Style::default().fg(palette.accent)));
        }
        Line::from(spans)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(" / ", Style::default().fg(palette.dim)));
    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn render_type_row(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let focused = app.focus == Focus::Types;
    let language = app.language();
    let mut spans: Vec<Span> = Vec::new();
    for (idx, tag) in KNOWN_TYPES.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        let selected = app.criteria.types.contains(*tag);
        let under_cursor = focused && idx == app.type_cursor;
        let mut style = if selected {
            Style::default()
                .bg(type_color(tag))
                .fg(ratatui::style::Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(type_color(tag))
        };
        if under_cursor {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        spans.push(Span::styled(lang::type_label(tag, language).to_string(), style));
    }
    let border = if focused { palette.accent } else { palette.border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_entries(frame: &mut Frame, app: &App, palette: &Palette, labels: &Labels, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));

    if app.catalog.is_none() {
        let message = if app.catalog_loading {
            Line::from(Span::styled(
                format!("{} {}", spinner_frame(app.tick_count), labels.loading_catalog),
                Style::default().fg(palette.accent),
            ))
        } else if app.catalog_error.is_some() {
            Line::from(Span::styled(
                format!("{} · {}", labels.catalog_failed, labels.retry_hint),
                Style::default().fg(palette.error),
            ))
        } else {
            Line::from("")
        };
        frame.render_widget(Paragraph::new(message).block(block), area);
        return;
    }

    let entries = app.page_entries();
    if entries.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                labels.no_results,
                Style::default().fg(palette.dim),
            )))
            .block(block),
            area,
        );
        return;
    }

    let language = app.language();
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let mut spans = vec![
                Span::styled(entry.formatted_id(), Style::default().fg(palette.dim)),
                Span::raw(" "),
                Span::styled(
                    pad_to_width(&entry.display_name(language), NAME_COLUMN_WIDTH),
                    Style::default().fg(palette.text),
                ),
                Span::raw(" "),
            ];
            for (idx, tag) in entry.types.iter().enumerate() {
                if idx > 0 {
                    spans.push(Span::raw("/"));
                }
                spans.push(Span::styled(
                    lang::type_label(tag, language).to_string(),
                    Style::default().fg(type_color(tag)),
                ));
            }
            if app.favorites.is_favorite(entry.id) {
                spans.push(Span::raw(" "));
                spans.push(Span::styled("♥", Style::default().fg(palette.favorite)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(palette.selection_bg)
            .fg(palette.selection_fg)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_pagination(frame: &mut Frame, app: &App, palette: &Palette, labels: &Labels, area: Rect) {
    let window = &app.view.window;
    let mut spans: Vec<Span> = Vec::new();
    let prev_style = if window.page > 1 {
        Style::default().fg(palette.text)
    } else {
        Style::default().fg(palette.dim)
    };
    let next_style = if window.page < window.total_pages {
        Style::default().fg(palette.text)
    } else {
        Style::default().fg(palette.dim)
    };
    spans.push(Span::styled(" ‹ ", prev_style));
    for number in page_numbers(window) {
        if number == window.page {
            spans.push(Span::styled(
                format!("[{number}]"),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!(" {number} "),
                Style::default().fg(palette.dim),
            ));
        }
    }
    spans.push(Span::styled(" › ", next_style));
    spans.push(Span::styled(
        format!(
            "  {} {}/{} · {}",
            labels.page,
            window.page,
            window.total_pages.max(1),
            window.filtered_count
        ),
        Style::default().fg(palette.dim),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let hints = match app.focus {
        Focus::List => {
            "↑↓ select · ←→ page · ⏎ open · f fav · v favorites · g gen · / search · t types · L lang · T theme · r reload · q quit"
        }
        Focus::Search => "type to filter · ⏎ apply · esc back · tab next",
        Focus::Types => "←→ move · space toggle · esc back · tab next",
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            truncate_to_width(hints, area.width as usize),
            Style::default().fg(palette.dim),
        ))),
        area,
    );
}
