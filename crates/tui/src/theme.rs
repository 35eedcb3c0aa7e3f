//! Theme and styling for the registration TUI.
//!
//! This module defines the color scheme and styling helpers used throughout
//! the interface: a dark background with a single accent color for focus,
//! and a warning color reserved for validation errors.

use ratatui::style::{Color, Modifier, Style};

/// Accent color for highlights and focus indicators.
pub const ACCENT: Color = Color::Rgb(94, 189, 171);

/// Primary foreground color for normal text.
pub const FG: Color = Color::Rgb(224, 224, 230);

/// Muted foreground color for placeholders, hints, and secondary text.
pub const FG_MUTED: Color = Color::Rgb(150, 150, 158);

/// Default border color for unfocused elements.
pub const BORDER: Color = Color::Rgb(72, 72, 80);

/// Border color for the focused element.
pub const BORDER_FOCUS: Color = ACCENT;

/// Warning color for validation errors and failed requests.
pub const WARN: Color = Color::Rgb(220, 96, 110);

/// Border style for an element, switching on focus state.
pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_FOCUS)
    } else {
        Style::default().fg(BORDER)
    }
}

/// Style for regular field text.
pub fn text_style() -> Style {
    Style::default().fg(FG)
}

/// Style for placeholder text shown in an empty field.
pub fn placeholder_style() -> Style {
    Style::default().fg(FG_MUTED).add_modifier(Modifier::ITALIC)
}

/// Style for the error label beneath a field.
pub fn error_style() -> Style {
    Style::default().fg(WARN)
}

/// Style for the submit button, switching on enablement and focus.
///
/// A disabled button renders dimmed regardless of focus, mirroring the
/// original's half-transparent disabled state.
pub fn button_style(enabled: bool, focused: bool) -> Style {
    if !enabled {
        return Style::default().fg(FG_MUTED).add_modifier(Modifier::DIM);
    }
    if focused {
        Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT)
    }
}

/// Style for the status line at the bottom of the screen.
pub fn status_style() -> Style {
    Style::default().fg(FG_MUTED)
}
