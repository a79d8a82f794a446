//! Frame state: the only memory that survives between frames.
//!
//! Everything else (boxes, elements) is redeclared by the caller on every
//! pass. This struct tracks which box and which selectable element hold
//! focus, the raw input gathered since the last flush, and whether the
//! pass that just ran has to be redrawn before it can be presented.
//!
//! Focus is a pair `(focus_box, focus_elem)`. `focus_elem` counts
//! selectable elements only, so separators never occupy a slot, and is
//! `None` while the focused box has nothing to select.

use std::collections::HashSet;

use crate::theme::Palette;
use crate::types::{Click, InputEvent, Key};

/// Redraw passes allowed per frame before `settle` gives up and presents.
pub const DEFAULT_MAX_PASSES: usize = 16;

// ============================================================================
// FRAME STATE
// ============================================================================

#[derive(Debug, Default)]
pub struct FrameState {
    focus_box: usize,
    focus_elem: Option<usize>,

    /// Boxes composed so far in the current pass. Doubles as the id of the
    /// next box.
    boxes_seen: usize,

    keys_down: HashSet<Key>,
    pending_text: Option<char>,
    pending_click: Option<Click>,
    needs_redraw: bool,

    pub palette: Palette,
}

impl FrameState {
    /// Fresh session state: focus on the first element of the first box.
    pub fn new() -> Self {
        FrameState {
            focus_elem: Some(0),
            ..Default::default()
        }
    }

    pub fn with_palette(palette: Palette) -> Self {
        FrameState {
            palette,
            ..FrameState::new()
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn focus_box(&self) -> usize {
        self.focus_box
    }

    pub fn focus_elem(&self) -> Option<usize> {
        self.focus_elem
    }

    /// Boxes composed since the last flush.
    pub fn boxes_seen(&self) -> usize {
        self.boxes_seen
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn pending_click(&self) -> Option<Click> {
        self.pending_click
    }

    /// Move focus explicitly, e.g. to restore a remembered position.
    /// Out-of-range values are clamped by the next composition and flush.
    pub fn set_focus(&mut self, focus_box: usize, focus_elem: Option<usize>) {
        self.focus_box = focus_box;
        self.focus_elem = focus_elem;
    }

    // ------------------------------------------------------------------------
    // Input registration
    // ------------------------------------------------------------------------

    /// Record one raw input event for the next pass.
    ///
    /// A later click replaces an earlier unconsumed one.
    pub fn register_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key { key, ch } => {
                tracing::trace!(?key, ?ch, "key registered");
                self.keys_down.insert(key);
                if ch.is_some() {
                    self.pending_text = ch;
                }
            }
            InputEvent::Click(click) => {
                tracing::trace!(x = click.x, y = click.y, "click registered");
                self.pending_click = Some(click);
            }
            InputEvent::Other => {}
        }
    }

    // ------------------------------------------------------------------------
    // End of pass
    // ------------------------------------------------------------------------

    /// Finish a pass: clamp focus to the boxes actually declared, drop the
    /// input of this frame, and report whether another pass is required.
    pub fn flush(&mut self) -> bool {
        if self.boxes_seen > 0 && self.focus_box >= self.boxes_seen {
            tracing::debug!(
                from = self.focus_box,
                to = self.boxes_seen - 1,
                "focused box no longer declared, clamping"
            );
            self.focus_box = self.boxes_seen - 1;
            self.needs_redraw = true;
        }

        self.boxes_seen = 0;
        self.keys_down.clear();
        self.pending_text = None;
        self.pending_click = None;

        std::mem::take(&mut self.needs_redraw)
    }

    /// Run `pass` and flush until a flush reports the frame stable.
    ///
    /// Input registered before the call is seen by the first pass only.
    /// Stops after `max_passes` even if focus keeps moving. Returns the
    /// number of passes run.
    pub fn settle<F>(&mut self, max_passes: usize, mut pass: F) -> usize
    where
        F: FnMut(&mut FrameState),
    {
        let max_passes = max_passes.max(1);
        let mut passes = 0;
        while passes < max_passes {
            pass(self);
            passes += 1;
            if !self.flush() {
                return passes;
            }
        }
        tracing::warn!(passes, "frame did not settle, presenting last pass");
        passes
    }

    // ------------------------------------------------------------------------
    // Box composition hooks
    // ------------------------------------------------------------------------

    /// Id the next composed box will get.
    pub(crate) fn next_box_id(&self) -> usize {
        self.boxes_seen
    }

    pub(crate) fn end_box(&mut self) {
        self.boxes_seen += 1;
    }

    pub(crate) fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Keyboard focus movement for box `box_id` holding `selectable` elements.
    ///
    /// No-op unless that box holds focus. Up/down stay inside the box;
    /// left/right move to a neighbouring box and are consumed so they do
    /// not fire again on the box that receives focus later in this pass.
    pub(crate) fn advance_focus(&mut self, box_id: usize, selectable: usize) {
        if self.focus_box != box_id {
            return;
        }

        if self.is_down(Key::Up) {
            if let Some(elem) = self.focus_elem {
                if elem > 0 {
                    self.focus_elem = Some(elem - 1);
                }
            }
        }

        if self.is_down(Key::Down) {
            self.focus_elem = Some(self.focus_elem.map_or(0, |elem| elem + 1));
        }

        self.focus_elem = clamp_elem(self.focus_elem, selectable);

        if self.is_down(Key::Left) && self.focus_box > 0 {
            self.focus_box -= 1;
            self.keys_down.remove(&Key::Left);
            self.needs_redraw = true;
            tracing::debug!(focus_box = self.focus_box, "focus moved left");
        }

        if self.keys_down.remove(&Key::Right) {
            self.focus_box += 1;
            self.needs_redraw = true;
            tracing::debug!(focus_box = self.focus_box, "focus moved right");
        }
    }

    /// A click claimed element `elem` of box `box_id`.
    pub(crate) fn focus_clicked(&mut self, box_id: usize, elem: usize) {
        tracing::debug!(box_id, elem, "focus moved by click");
        self.focus_box = box_id;
        self.focus_elem = Some(elem);
        self.needs_redraw = true;
    }

    pub(crate) fn take_click(&mut self) -> Option<Click> {
        self.pending_click.take()
    }

    pub(crate) fn restore_click(&mut self, click: Option<Click>) {
        if click.is_some() {
            self.pending_click = click;
        }
    }

    pub(crate) fn take_text_input(&mut self) -> Option<char> {
        self.pending_text.take()
    }
}

/// Clamp a selectable index into `[0, count - 1]`, or `None` for an empty box.
fn clamp_elem(elem: Option<usize>, count: usize) -> Option<usize> {
    if count == 0 {
        None
    } else {
        Some(elem.unwrap_or(0).min(count - 1))
    }
}

// ============================================================================
// TESTS
// ============================================================================
