//! Detail screen for a single entry.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::lang::{self, Labels};
use crate::models::{artwork_url, CatalogEntry, EntryDetails};
use crate::ui::helpers::{pad_to_width, spinner_frame, stat_bar, truncate_to_width};
use crate::ui::theme::{type_color, Palette};

const STAT_BAR_WIDTH: usize = 20;
const STAT_NAME_WIDTH: usize = 10;

pub fn render_detail(frame: &mut Frame, app: &App) {
    let Some(id) = app.detail_id else {
        return;
    };
    let palette = crate::ui::theme::palette(app.theme_kind());
    let labels = lang::labels(app.language());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let entry = app.catalog.as_ref().and_then(|c| c.entry_by_id(id));
    render_title(frame, app, palette, id, entry, chunks[0]);
    render_body(frame, app, palette, labels, id, chunks[1]);
    render_flavor(frame, app, palette, labels, id, chunks[2]);
    render_lineage(frame, app, palette, labels, id, chunks[3]);
    render_footer(frame, palette, chunks[4]);
}

fn render_title(
    frame: &mut Frame,
    app: &App,
    palette: &Palette,
    id: u32,
    entry: Option<&CatalogEntry>,
    area: Rect,
) {
    let language = app.language();
    let mut spans: Vec<Span> = vec![Span::styled(
        format!("#{id:04} "),
        Style::default().fg(palette.dim),
    )];
    match entry {
        Some(entry) => {
            spans.push(Span::styled(
                entry.display_name(language),
                Style::default()
                    .fg(palette.header)
                    .add_modifier(Modifier::BOLD),
            ));
            // Secondary name in the other language, when it differs.
            let other = entry.display_name(language.toggle());
            if other != entry.display_name(language) {
                spans.push(Span::styled(
                    format!("  {other}"),
                    Style::default().fg(palette.dim),
                ));
            }
        }
        None => {
            // Species profile may still know a name for an id outside the
            // catalog.
            let profile_name = app
                .details
                .species(id)
                .and_then(|p| p.localized_name(language))
                .unwrap_or("?");
            spans.push(Span::styled(
                profile_name.to_string(),
                Style::default()
                    .fg(palette.header)
                    .add_modifier(Modifier::BOLD),
            ));
        }
    }
    if app.favorites.is_favorite(id) {
        spans.push(Span::styled("  ♥", Style::default().fg(palette.favorite)));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_body(
    frame: &mut Frame,
    app: &App,
    palette: &Palette,
    labels: &Labels,
    id: u32,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));

    let Some(details) = app.details.details(id) else {
        let message = if let Some(error) = &app.detail_error {
            Line::from(Span::styled(
                format!(
                    "{} ({})",
                    labels.detail_failed,
                    truncate_to_width(error, 60)
                ),
                Style::default().fg(palette.error),
            ))
        } else {
            Line::from(Span::styled(
                format!("{} {}", spinner_frame(app.tick_count), labels.detail_loading),
                Style::default().fg(palette.accent),
            ))
        };
        frame.render_widget(Paragraph::new(message).block(block), area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(inner);
    render_physical(frame, app, palette, labels, details, columns[0]);
    render_stats(frame, app, palette, labels, details, columns[1]);
}

fn render_physical(
    frame: &mut Frame,
    app: &App,
    palette: &Palette,
    labels: &Labels,
    details: &EntryDetails,
    area: Rect,
) {
    let language = app.language();
    let mut lines: Vec<Line> = Vec::new();

    let mut type_spans: Vec<Span> = Vec::new();
    for (idx, tag) in details.types.iter().enumerate() {
        if idx > 0 {
            type_spans.push(Span::raw(" "));
        }
        type_spans.push(Span::styled(
            format!(" {} ", lang::type_label(tag, language)),
            Style::default()
                .bg(type_color(tag))
                .fg(ratatui::style::Color::Black),
        ));
    }
    lines.push(Line::from(type_spans));
    lines.push(Line::from(""));
    lines.push(meta_line(palette, labels.height, format!("{:.1} m", details.height_m)));
    lines.push(meta_line(palette, labels.weight, format!("{:.1} kg", details.weight_kg)));
    lines.push(meta_line(
        palette,
        labels.abilities,
        details.abilities.join(", "),
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        truncate_to_width(&artwork_url(details.id), area.width as usize),
        Style::default().fg(palette.dim),
    )));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn meta_line(palette: &Palette, label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(palette.dim)),
        Span::styled(value, Style::default().fg(palette.text)),
    ])
}

fn render_stats(
    frame: &mut Frame,
    app: &App,
    palette: &Palette,
    labels: &Labels,
    details: &EntryDetails,
    area: Rect,
) {
    let language = app.language();
    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        labels.base_stats,
        Style::default()
            .fg(palette.text)
            .add_modifier(Modifier::BOLD),
    ))];
    for stat in &details.stats {
        lines.push(Line::from(vec![
            Span::styled(
                pad_to_width(lang::stat_label(&stat.name, language), STAT_NAME_WIDTH),
                Style::default().fg(palette.dim),
            ),
            Span::styled(
                stat_bar(stat.ratio(), STAT_BAR_WIDTH),
                Style::default().fg(palette.accent),
            ),
            Span::styled(format!(" {:>3}", stat.value), Style::default().fg(palette.text)),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_flavor(
    frame: &mut Frame,
    app: &App,
    palette: &Palette,
    labels: &Labels,
    id: u32,
    area: Rect,
) {
    let text = match app.details.species(id).and_then(|p| p.flavor(app.language())) {
        Some(flavor) => Span::styled(flavor.to_string(), Style::default().fg(palette.text)),
        None => Span::styled(labels.flavor_missing, Style::default().fg(palette.dim)),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));
    frame.render_widget(
        Paragraph::new(Line::from(text))
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn render_lineage(
    frame: &mut Frame,
    app: &App,
    palette: &Palette,
    labels: &Labels,
    id: u32,
    area: Rect,
) {
    let language = app.language();
    let mut spans: Vec<Span> = Vec::new();
    match app.details.lineage(id) {
        Some(lineage) if !lineage.is_empty() => {
            for (idx, member) in lineage.iter().enumerate() {
                if idx > 0 {
                    spans.push(Span::styled(" → ", Style::default().fg(palette.dim)));
                }
                let name = app
                    .catalog
                    .as_ref()
                    .and_then(|c| c.entry_by_id(*member))
                    .map(|e| e.display_name(language))
                    .unwrap_or_else(|| format!("#{member:04}"));
                let style = if *member == id {
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.text)
                };
                spans.push(Span::styled(name, style));
            }
        }
        _ => {
            spans.push(Span::styled("···", Style::default().fg(palette.dim)));
        }
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(Span::styled(
            format!(" {} ", labels.evolution),
            Style::default().fg(palette.dim),
        ));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_footer(frame: &mut Frame, palette: &Palette, area: Rect) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "esc back · f fav · L lang · T theme",
            Style::default().fg(palette.dim),
        ))),
        area,
    );
}
