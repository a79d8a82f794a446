//! Focus palette and element styles.
//!
//! Three roles, carried per session on the frame state:
//! - default: everything not focused
//! - selected: border and separators of the focused box, focused button
//! - cursor: the focused element itself

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// STYLE CONSTANTS
// ============================================================================

/// Unfocused content.
pub const STYLE_DEFAULT: Style = Style::new();

/// Focused box frame.
pub const STYLE_SELECTED: Style = Style::new().fg(Color::Cyan);

/// Focused element.
pub const STYLE_CURSOR: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Placeholder dots in the unused part of a text input.
pub const STYLE_FILL: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// PALETTE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub default: Style,
    pub selected: Style,
    pub cursor: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            default: STYLE_DEFAULT,
            selected: STYLE_SELECTED,
            cursor: STYLE_CURSOR,
        }
    }
}

impl Palette {
    /// Palette using `accent` for both the focused box and the focused element.
    pub fn with_accent(accent: Color) -> Self {
        Palette {
            default: STYLE_DEFAULT,
            selected: Style::new().fg(accent),
            cursor: Style::new().fg(accent).add_modifier(Modifier::BOLD),
        }
    }

    /// Button background highlight when focused.
    pub fn button_focus(&self) -> Style {
        match self.selected.fg {
            Some(color) => Style::new().fg(Color::Black).bg(color),
            None => Style::new().add_modifier(Modifier::REVERSED),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
