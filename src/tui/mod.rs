//! Terminal frontend for forms built from boxes.
//!
//! - `run`: terminal lifecycle, crossterm event mapping, the frame loop

pub mod run;

pub use run::{map_event, render_form, run, Exit, Form, SessionConfig};
