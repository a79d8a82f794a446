//! imbox demo
//!
//! A small command picker: choose commands and a directory, then press
//! Run! to print the selection. Esc cancels.

use std::cell::Cell;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ratatui::buffer::Buffer;
use ratatui::style::Color;
use serde::Serialize;

use imbox::logging;
use imbox::tui::{self, Exit, Form, SessionConfig};
use imbox::{compose_box, Element, FrameState, Palette, DEFAULT_MAX_PASSES};

#[derive(Parser)]
#[command(name = "imbox-demo")]
#[command(about = "Pick commands and a directory in an immediate-mode form")]
#[command(version)]
struct Cli {
    /// Output format for the final selection
    #[arg(long, value_enum, default_value = "human")]
    format: OutputFormatArg,

    /// Do not capture the mouse
    #[arg(long)]
    no_mouse: bool,

    /// Focus colour (ratatui colour name, e.g. cyan, magenta, #ff8800)
    #[arg(long, default_value = "cyan")]
    accent: Color,

    /// Redraw passes allowed per frame
    #[arg(long, default_value_t = DEFAULT_MAX_PASSES)]
    max_passes: usize,

    /// Log directory (default: platform data dir)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<&Cli> for SessionConfig {
    fn from(cli: &Cli) -> Self {
        SessionConfig {
            mouse: !cli.no_mouse,
            palette: Palette::with_accent(cli.accent),
            max_passes: cli.max_passes,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cmd_pick(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// FORM
// ============================================================================

/// Radio id of the free-text directory option.
const OTHER_DIR: usize = 5;

const DIRS: [(usize, &str); 3] = [(0, "/"), (1, "~"), (2, "~/Downloads")];

#[derive(Debug, Default)]
struct Picker {
    tree: bool,
    ls: bool,
    selected_dir: Cell<usize>,
    other_dir: String,
    run: bool,
}

impl Form for Picker {
    fn compose(&mut self, state: &mut FrameState, buf: &mut Buffer) {
        compose_box(
            state,
            buf,
            2,
            1,
            "Commands",
            &mut [
                Element::checkbox(&mut self.tree, "tree"),
                Element::checkbox(&mut self.ls, "ls"),
            ],
        );

        let mut dirs: Vec<Element<'_>> = DIRS
            .iter()
            .map(|&(id, label)| Element::radio(&self.selected_dir, id, label))
            .collect();
        dirs.push(Element::separator(""));
        dirs.push(Element::radio(&self.selected_dir, OTHER_DIR, "Other:"));
        dirs.push(Element::text_edit(&mut self.other_dir));
        compose_box(state, buf, 16, 1, "Dirs", &mut dirs);

        let run = &mut self.run;
        compose_box(
            state,
            buf,
            38,
            1,
            "",
            &mut [Element::button("Run!", || *run = true)],
        );
    }

    fn should_quit(&self) -> bool {
        self.run
    }
}

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, PartialEq, Serialize)]
struct Selection {
    commands: Vec<&'static str>,
    dir: String,
}

impl Picker {
    fn selection(&self) -> Selection {
        let mut commands = Vec::new();
        if self.tree {
            commands.push("tree");
        }
        if self.ls {
            commands.push("ls");
        }

        let chosen = self.selected_dir.get();
        let dir = DIRS
            .iter()
            .find(|&&(id, _)| id == chosen)
            .map(|&(_, label)| label.to_string())
            .unwrap_or_else(|| self.other_dir.clone());

        Selection { commands, dir }
    }
}

fn format_selection(selection: &Selection, format: OutputFormatArg) -> Result<String, String> {
    match format {
        OutputFormatArg::Human => {
            let commands = if selection.commands.is_empty() {
                "(none)".to_string()
            } else {
                selection.commands.join(", ")
            };
            Ok(format!("Commands: {}\nDirectory: {}", commands, selection.dir))
        }
        OutputFormatArg::Json => {
            serde_json::to_string_pretty(selection).map_err(|e| e.to_string())
        }
    }
}

// ============================================================================
// COMMAND HANDLER
// ============================================================================

fn cmd_pick(cli: &Cli) -> Result<(), String> {
    let log_dir = cli.log_dir.clone().unwrap_or_else(logging::default_log_dir);
    if let Err(e) = logging::init(&log_dir) {
        eprintln!("Note: logging disabled ({})", e);
    }

    let mut picker = Picker::default();
    let exit = tui::run(SessionConfig::from(cli), &mut picker).map_err(|e| e.to_string())?;

    match exit {
        Exit::Finished => {
            println!("{}", format_selection(&picker.selection(), cli.format)?);
        }
        Exit::Cancelled => tracing::info!("cancelled, nothing to run"),
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use imbox::tui::render_form;
    use imbox::{InputEvent, Key};
    use ratatui::layout::Rect;

    fn frame(state: &mut FrameState, picker: &mut Picker, input: &[InputEvent]) {
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 12));
        for &event in input {
            state.register_event(event);
        }
        render_form(state, &mut buf, picker, DEFAULT_MAX_PASSES);
    }

    #[test]
    fn cli_maps_to_session_config() {
        let cli = Cli::parse_from(["imbox-demo", "--no-mouse", "--accent", "magenta"]);
        let config = SessionConfig::from(&cli);
        assert!(!config.mouse);
        assert_eq!(config.palette.selected.fg, Some(Color::Magenta));
        assert_eq!(config.max_passes, DEFAULT_MAX_PASSES);
    }

    #[test]
    fn keyboard_walkthrough_picks_downloads_and_runs() {
        let mut state = FrameState::new();
        let mut picker = Picker::default();

        frame(&mut state, &mut picker, &[InputEvent::key(Key::Space)]);
        assert!(picker.tree);

        frame(&mut state, &mut picker, &[InputEvent::key(Key::Right)]);
        assert_eq!(state.focus_box(), 1);

        frame(&mut state, &mut picker, &[InputEvent::key(Key::Down)]);
        frame(&mut state, &mut picker, &[InputEvent::key(Key::Down)]);
        frame(&mut state, &mut picker, &[InputEvent::key(Key::Space)]);
        assert_eq!(picker.selected_dir.get(), 2);

        frame(&mut state, &mut picker, &[InputEvent::key(Key::Right)]);
        frame(&mut state, &mut picker, &[InputEvent::key(Key::Enter)]);
        assert!(picker.should_quit());

        assert_eq!(
            picker.selection(),
            Selection {
                commands: vec!["tree"],
                dir: "~/Downloads".to_string(),
            }
        );
    }

    #[test]
    fn other_dir_uses_typed_text() {
        let mut state = FrameState::new();
        let mut picker = Picker::default();
        state.set_focus(1, Some(4));

        for ch in "/srv".chars() {
            frame(&mut state, &mut picker, &[InputEvent::char(ch)]);
        }
        assert_eq!(picker.other_dir, "/srv");

        picker.selected_dir.set(OTHER_DIR);
        assert_eq!(picker.selection().dir, "/srv");
    }

    #[test]
    fn human_format_lists_commands() {
        let selection = Selection {
            commands: vec!["tree", "ls"],
            dir: "~".to_string(),
        };
        let text = format_selection(&selection, OutputFormatArg::Human).unwrap();
        assert_eq!(text, "Commands: tree, ls\nDirectory: ~");
    }

    #[test]
    fn json_format_is_valid_json() {
        let selection = Selection {
            commands: vec![],
            dir: "/".to_string(),
        };
        let text = format_selection(&selection, OutputFormatArg::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["dir"], "/");
        assert!(value["commands"].as_array().unwrap().is_empty());
    }
}
