//! imbox: an immediate-mode terminal widget toolkit.
//!
//! Every frame the application redeclares its whole UI as a sequence of
//! boxes, each holding a list of elements that borrow the data they edit.
//! The toolkit draws them into a cell buffer and applies the frame's
//! keyboard and mouse input to whichever element holds focus.
//!
//! ```no_run
//! use std::cell::Cell;
//! use imbox::{compose_box, Element, FrameState, InputEvent};
//! use ratatui::{buffer::Buffer, layout::Rect};
//!
//! let mut state = FrameState::new();
//! let mut buf = Buffer::empty(Rect::new(0, 0, 40, 10));
//! let mut verbose = false;
//! let mode = Cell::new(0);
//!
//! state.register_event(InputEvent::click(4, 1));
//! state.settle(imbox::DEFAULT_MAX_PASSES, |state| {
//!     buf.reset();
//!     compose_box(state, &mut buf, 0, 0, "Options", &mut [
//!         Element::checkbox(&mut verbose, "verbose"),
//!         Element::separator("mode"),
//!         Element::radio(&mode, 0, "fast"),
//!         Element::radio(&mode, 1, "safe"),
//!     ]);
//! });
//! assert!(verbose);
//! ```

pub mod compose;
pub mod element;
pub mod logging;
pub mod state;
pub mod theme;
pub mod tui;
pub mod types;

pub use compose::compose_box;
pub use element::Element;
pub use state::{FrameState, DEFAULT_MAX_PASSES};
pub use theme::Palette;
pub use types::{Click, InputEvent, Key};
