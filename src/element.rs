//! Elements: the interactive (and decorative) rows of a box.
//!
//! Elements are built fresh by the caller on every pass and borrow the
//! values they edit. Ownership of the data stays with the application.
//! Radio options that share one `Cell` form a group; there is no group
//! object.
//!
//! A focused element applies at most one mutation per pass. When several
//! triggers are present the first one wins, in this order: a click that
//! landed on the element, space, then the element's own key (enter for
//! buttons, backspace or a typed character for text inputs).

use std::borrow::Cow;
use std::cell::Cell;
use std::fmt;

use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::style::Style;
use unicode_width::UnicodeWidthStr;

use crate::state::FrameState;
use crate::theme;
use crate::types::Key;

// ============================================================================
// ELEMENT
// ============================================================================

pub enum Element<'a> {
    /// Single-line text input bound to a string.
    TextEdit { text: &'a mut String },
    /// One option of a radio group; writes `id` into the shared selection.
    RadioOption {
        id: usize,
        selection: &'a Cell<usize>,
        label: Cow<'a, str>,
    },
    /// Labelled horizontal rule. Never focusable.
    Separator { label: Cow<'a, str> },
    /// Runs `on_press` when activated.
    Button {
        label: Cow<'a, str>,
        on_press: Box<dyn FnMut() + 'a>,
    },
    /// Toggle bound to a bool.
    CheckBox {
        value: &'a mut bool,
        label: Cow<'a, str>,
    },
}

impl<'a> Element<'a> {
    pub fn text_edit(text: &'a mut String) -> Self {
        Element::TextEdit { text }
    }

    pub fn radio(selection: &'a Cell<usize>, id: usize, label: impl Into<Cow<'a, str>>) -> Self {
        Element::RadioOption {
            id,
            selection,
            label: label.into(),
        }
    }

    pub fn separator(label: impl Into<Cow<'a, str>>) -> Self {
        Element::Separator {
            label: label.into(),
        }
    }

    pub fn button(label: impl Into<Cow<'a, str>>, on_press: impl FnMut() + 'a) -> Self {
        Element::Button {
            label: label.into(),
            on_press: Box::new(on_press),
        }
    }

    pub fn checkbox(value: &'a mut bool, label: impl Into<Cow<'a, str>>) -> Self {
        Element::CheckBox {
            value,
            label: label.into(),
        }
    }

    /// Columns this element needs inside its box.
    pub fn required_width(&self) -> u16 {
        match self {
            Element::TextEdit { text } => text_width(text).saturating_add(2),
            Element::RadioOption { label, .. } => text_width(label).saturating_add(4),
            Element::Separator { label } => text_width(label),
            Element::Button { label, .. } => text_width(label),
            Element::CheckBox { label, .. } => text_width(label).saturating_add(4),
        }
    }

    pub fn can_be_selected(&self) -> bool {
        !matches!(self, Element::Separator { .. })
    }

    /// Apply this pass's input (if focused), then draw the row.
    pub(crate) fn draw(&mut self, state: &mut FrameState, buf: &mut Buffer, ctx: DrawContext) {
        if ctx.elem_selected {
            self.apply_input(state, ctx.clicked);
        }
        self.render(state, buf, ctx);
    }

    // ------------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------------

    fn apply_input(&mut self, state: &mut FrameState, clicked: bool) {
        let space = state.is_down(Key::Space);
        match self {
            Element::CheckBox { value, .. } => {
                if clicked || space {
                    **value = !**value;
                }
            }
            Element::RadioOption { id, selection, .. } => {
                if clicked || space {
                    selection.set(*id);
                    state.request_redraw();
                }
            }
            Element::TextEdit { text } => {
                // A click only places focus on a text input.
                if clicked {
                    return;
                }
                if let Some(ch) = state.take_text_input() {
                    text.push(ch);
                    state.request_redraw();
                } else if space {
                    text.push(' ');
                    state.request_redraw();
                } else if state.is_down(Key::Backspace) && text.pop().is_some() {
                    state.request_redraw();
                }
            }
            Element::Button { on_press, .. } => {
                if clicked || space || state.is_down(Key::Enter) {
                    tracing::debug!("button activated");
                    on_press();
                }
            }
            Element::Separator { .. } => {}
        }
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    fn render(&self, state: &FrameState, buf: &mut Buffer, ctx: DrawContext) {
        let palette = state.palette;
        let fg = if ctx.elem_selected {
            palette.cursor
        } else {
            palette.default
        };
        let DrawContext { x, y, max_width, .. } = ctx;

        match self {
            Element::TextEdit { text } => {
                put(buf, x, y, '[', fg);
                put(buf, x.saturating_add(max_width), y, ']', fg);
                let used = text_width(text);
                write_text(buf, x.saturating_add(1), y, text, fg);
                for dx in used.saturating_add(1)..max_width {
                    put(buf, x.saturating_add(dx), y, '․', theme::STYLE_FILL);
                }
            }
            Element::RadioOption {
                id,
                selection,
                label,
            } => {
                let mark = if selection.get() == *id { '●' } else { ' ' };
                put(buf, x, y, '(', fg);
                put(buf, x.saturating_add(1), y, mark, fg);
                put(buf, x.saturating_add(2), y, ')', fg);
                write_text(buf, x.saturating_add(4), y, label, fg);
            }
            Element::CheckBox { value, label } => {
                let mark = if **value { 'x' } else { ' ' };
                put(buf, x, y, '[', fg);
                put(buf, x.saturating_add(1), y, mark, fg);
                put(buf, x.saturating_add(2), y, ']', fg);
                write_text(buf, x.saturating_add(4), y, label, fg);
            }
            Element::Separator { label } => {
                let style = if ctx.box_selected {
                    palette.selected
                } else {
                    palette.default
                };
                let left = x.saturating_sub(2);
                let right = x.saturating_add(max_width).saturating_add(1);
                put(buf, left, y, '├', style);
                for cx in left.saturating_add(1)..right {
                    put(buf, cx, y, '─', style);
                }
                put(buf, right, y, '┤', style);
                let offset = max_width.saturating_sub(text_width(label)) / 2;
                write_text(buf, x.saturating_add(offset), y, label, style);
            }
            Element::Button { label, .. } => {
                let style = if ctx.elem_selected {
                    palette.button_focus()
                } else {
                    palette.default
                };
                let offset = max_width.saturating_sub(text_width(label)) / 2;
                write_text(buf, x.saturating_add(offset), y, label, style);
            }
        }
    }
}

impl fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::TextEdit { text } => f.debug_struct("TextEdit").field("text", text).finish(),
            Element::RadioOption {
                id,
                selection,
                label,
            } => f
                .debug_struct("RadioOption")
                .field("id", id)
                .field("selection", &selection.get())
                .field("label", label)
                .finish(),
            Element::Separator { label } => {
                f.debug_struct("Separator").field("label", label).finish()
            }
            Element::Button { label, .. } => {
                f.debug_struct("Button").field("label", label).finish_non_exhaustive()
            }
            Element::CheckBox { value, label } => f
                .debug_struct("CheckBox")
                .field("value", value)
                .field("label", label)
                .finish(),
        }
    }
}

// ============================================================================
// DRAW CONTEXT
// ============================================================================

/// Where and how one element row is drawn during box composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DrawContext {
    pub x: u16,
    pub y: u16,
    /// Content width shared by every row of the box.
    pub max_width: u16,
    pub box_selected: bool,
    pub elem_selected: bool,
    /// The pending click landed on this element in this pass.
    pub clicked: bool,
}

// ============================================================================
// CELL HELPERS
// ============================================================================

/// Display width of `text` in terminal columns.
pub(crate) fn text_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

/// Set one cell, silently skipping positions outside the buffer.
fn put(buf: &mut Buffer, x: u16, y: u16, ch: char, style: Style) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_char(ch).set_style(style);
    }
}

/// Write `text` starting at `(x, y)`, clipped to the buffer.
fn write_text(buf: &mut Buffer, x: u16, y: u16, text: &str, style: Style) {
    let area = buf.area;
    if !area.contains(Position::new(x, y)) {
        return;
    }
    let room = usize::from(area.right() - x);
    buf.set_stringn(x, y, text, room, style);
}

// ============================================================================
// TESTS
// ============================================================================
