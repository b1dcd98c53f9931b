//! Color palettes and type colors.

use ratatui::style::Color;

use crate::prefs::ThemeKind;

pub struct Palette {
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub header: Color,
    pub error: Color,
    pub favorite: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
}

// ============================================================================
// Dark palette (default)
// ============================================================================

pub const DARK: Palette = Palette {
    border: Color::DarkGray,
    text: Color::White,
    dim: Color::DarkGray,
    accent: Color::LightYellow,
    header: Color::White,
    error: Color::Red,
    favorite: Color::LightRed,
    selection_bg: Color::Rgb(60, 60, 80),
    selection_fg: Color::White,
};

// ============================================================================
// Light palette
// ============================================================================

pub const LIGHT: Palette = Palette {
    border: Color::Gray,
    text: Color::Black,
    dim: Color::Gray,
    accent: Color::Blue,
    header: Color::Black,
    error: Color::Red,
    favorite: Color::Red,
    selection_bg: Color::Rgb(210, 210, 230),
    selection_fg: Color::Black,
};

pub fn palette(kind: ThemeKind) -> &'static Palette {
    match kind {
        ThemeKind::Dark => &DARK,
        ThemeKind::Light => &LIGHT,
    }
}

/// Classic series colors, one per type tag.
pub fn type_color(tag: &str) -> Color {
    match tag {
        "normal" => Color::Rgb(168, 168, 120),
        "fire" => Color::Rgb(240, 128, 48),
        "water" => Color::Rgb(104, 144, 240),
        "electric" => Color::Rgb(248, 208, 48),
        "grass" => Color::Rgb(120, 200, 80),
        "ice" => Color::Rgb(152, 216, 216),
        "fighting" => Color::Rgb(192, 48, 40),
        "poison" => Color::Rgb(160, 64, 160),
        "ground" => Color::Rgb(224, 192, 104),
        "flying" => Color::Rgb(168, 144, 240),
        "psychic" => Color::Rgb(248, 88, 136),
        "bug" => Color::Rgb(168, 184, 32),
        "rock" => Color::Rgb(184, 160, 56),
        "ghost" => Color::Rgb(112, 88, 152),
        "dragon" => Color::Rgb(112, 56, 248),
        "dark" => Color::Rgb(112, 88, 72),
        "steel" => Color::Rgb(184, 184, 208),
        "fairy" => Color::Rgb(238, 153, 172),
        _ => Color::DarkGray,
    }
}
