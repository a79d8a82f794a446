//! Input vocabulary shared by the frame state and the elements.
//!
//! These types are terminal-library agnostic. The `tui` module converts
//! crossterm events into them at the boundary, so the core can be driven
//! (and tested) without a terminal.

// ============================================================================
// KEYS
// ============================================================================

/// A key the toolkit reacts to.
///
/// Only navigation and activation keys are distinguished. Any other
/// printable key arrives as `Char` and is offered to text inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Backspace,
    Esc,
    /// Any other printable key.
    Char(char),
}

// ============================================================================
// EVENTS
// ============================================================================

/// Screen position of a left-button mouse press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Click {
    pub x: u16,
    pub y: u16,
}

/// One raw input event, as polled from the cell surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key press, with the printable character it produced (if any).
    Key { key: Key, ch: Option<char> },
    /// Left mouse button pressed at a cell.
    Click(Click),
    /// Resize, focus change, other mouse buttons... ignored by the core.
    Other,
}

impl InputEvent {
    /// Key press that produces no printable character.
    pub fn key(key: Key) -> Self {
        InputEvent::Key { key, ch: None }
    }

    /// Printable character key press.
    pub fn char(c: char) -> Self {
        InputEvent::Key {
            key: Key::Char(c),
            ch: Some(c),
        }
    }

    pub fn click(x: u16, y: u16) -> Self {
        InputEvent::Click(Click { x, y })
    }
}

// ============================================================================
// TESTS
// ============================================================================
