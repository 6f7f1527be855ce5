//! Formatting utilities used for CLI outputs.
//! Widths are display columns, so CJK text and emoji line up.

use crate::models::Style;
use ansi_term::Colour;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Pad `s` with spaces up to `width` display columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

/// Cut `s` to at most `width` display columns, marking the cut with `…`.
pub fn truncate_display(s: &str, width: usize) -> String {
    if UnicodeWidthStr::width(s) <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > width - 1 {
            break;
        }
        out.push(ch);
        used += cw;
    }
    out.push('…');
    out
}

/// One-line preview of a post: first non-empty line, truncated.
pub fn preview(content: &str, width: usize) -> String {
    let first = content
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("");
    truncate_display(first, width)
}

/// Colour used for a style label in listings.
pub fn style_colour(label: &str) -> Colour {
    match Style::from_label(label) {
        Some(Style::Hype) => Colour::Red,
        Some(Style::Bestie) => Colour::Purple,
        Some(Style::Expert) => Colour::Blue,
        Some(Style::Comedic) => Colour::Yellow,
        None => Colour::White,
    }
}
