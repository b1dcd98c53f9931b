//! Small formatting utilities shared by the screens.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Spinner frames for loading states.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()]
}

/// Cut a string to a display width, appending an ellipsis when something
/// was dropped. Width is measured in terminal cells, so wide characters
/// count double.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let budget = max_width - 1;
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Truncate then right-pad to an exact display width, so columns line up
/// even with mixed-width scripts.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let truncated = truncate_to_width(text, width);
    let pad = width.saturating_sub(truncated.width());
    let mut out = truncated;
    out.push_str(&" ".repeat(pad));
    out
}

/// Gauge bar for a base stat, scaled to `width` cells.
pub fn stat_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width - filled));
    bar
}
