//! Terminal frontend: event loop, terminal lifecycle, event mapping.
//!
//! This is the only module with side effects. It feeds crossterm events
//! into a [`FrameState`] and lets a [`Form`] compose its boxes into the
//! ratatui frame buffer, re-composing until focus settles before the
//! frame is presented.
//!
//! Single-threaded: the loop blocks on `event::read` between frames.

use std::io;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

use crate::state::{FrameState, DEFAULT_MAX_PASSES};
use crate::theme::Palette;
use crate::types::{InputEvent, Key};

// ============================================================================
// FORM
// ============================================================================

/// An application screen built from boxes.
///
/// `compose` is called once per pass and must declare the same boxes for
/// the same data; it may run several times per frame.
pub trait Form {
    /// Declare this pass's boxes with [`compose_box`](crate::compose::compose_box).
    fn compose(&mut self, state: &mut FrameState, buf: &mut Buffer);

    /// Checked after every presented frame.
    fn should_quit(&self) -> bool {
        false
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The form asked to quit.
    Finished,
    /// Esc pressed.
    Cancelled,
}

/// Frontend settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub mouse: bool,
    pub palette: Palette,
    pub max_passes: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            mouse: true,
            palette: Palette::default(),
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

// ============================================================================
// EVENT MAPPING
// ============================================================================

/// Map a crossterm event to the toolkit's input vocabulary.
///
/// Space maps to `Key::Space` without a printable character so text
/// inputs do not insert it twice. Key releases are ignored.
pub fn map_event(event: Event) -> InputEvent {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => InputEvent::click(column, row),
        _ => InputEvent::Other,
    }
}

fn map_key(key: KeyEvent) -> InputEvent {
    if key.kind == KeyEventKind::Release {
        return InputEvent::Other;
    }

    match key.code {
        KeyCode::Up => InputEvent::key(Key::Up),
        KeyCode::Down => InputEvent::key(Key::Down),
        KeyCode::Left => InputEvent::key(Key::Left),
        KeyCode::Right => InputEvent::key(Key::Right),
        KeyCode::Enter => InputEvent::key(Key::Enter),
        KeyCode::Backspace => InputEvent::key(Key::Backspace),
        KeyCode::Esc => InputEvent::key(Key::Esc),
        KeyCode::Char(' ') => InputEvent::key(Key::Space),
        KeyCode::Char(c) => {
            // Chorded keys are not text.
            if key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            {
                InputEvent::key(Key::Char(c))
            } else {
                InputEvent::char(c)
            }
        }
        _ => InputEvent::Other,
    }
}

// ============================================================================
// FRAME RENDERING
// ============================================================================

/// Compose `form` into `buf` until the frame state settles.
///
/// The buffer is cleared before every pass, so only the last pass is
/// left for presenting. Returns the number of passes.
pub fn render_form<F: Form + ?Sized>(
    state: &mut FrameState,
    buf: &mut Buffer,
    form: &mut F,
    max_passes: usize,
) -> usize {
    state.settle(max_passes, |state| {
        buf.reset();
        form.compose(state, buf);
    })
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal(mouse: bool) -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    if mouse {
        io::stdout().execute(EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
///
/// Button callbacks run inside the frame loop; a panic there must not
/// leave the terminal in raw mode.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        tracing::error!(panic = %panic_info, "panic");
        original_hook(panic_info);
    }));
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run `form` in the terminal until it asks to quit or Esc is pressed.
pub fn run<F: Form>(config: SessionConfig, form: &mut F) -> io::Result<Exit> {
    install_panic_hook();
    let mut terminal = setup_terminal(config.mouse)?;
    let mut state = FrameState::with_palette(config.palette);
    tracing::info!(mouse = config.mouse, "session started");

    let exit = loop {
        terminal.draw(|frame| {
            let passes = render_form(&mut state, frame.buffer_mut(), &mut *form, config.max_passes);
            tracing::trace!(passes, "frame composed");
        })?;

        if form.should_quit() {
            break Exit::Finished;
        }

        let input = map_event(event::read()?);
        if input == InputEvent::key(Key::Esc) {
            break Exit::Cancelled;
        }
        state.register_event(input);
    };

    restore_terminal()?;
    tracing::info!(?exit, "session ended");
    Ok(exit)
}

// ============================================================================
// TESTS
// ============================================================================
