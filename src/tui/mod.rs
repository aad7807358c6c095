//! Terminal User Interface (TUI) for studyfocus.
//!
//! A live countdown refreshed once per second, with single-key controls.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::App;

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::controller::PomodoroController;
use crate::core::Clock;
use crate::error::StudyError;
use crate::sessions::SessionBackend;
use crate::timer::StatePersistence;

const TICK_RATE: Duration = Duration::from_secs(1);

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run<B: SessionBackend, C: Clock, P: StatePersistence>(
    controller: &mut PomodoroController<B, C, P>,
) -> Result<(), StudyError> {
    // Setup terminal
    enable_raw_mode().map_err(|e| StudyError::Config(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| StudyError::Config(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| StudyError::Config(format!("Failed to create terminal: {e}")))?;

    let mut app = App::new(controller);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<T: Backend, B: SessionBackend, C: Clock, P: StatePersistence>(
    terminal: &mut Terminal<T>,
    app: &mut App<'_, B, C, P>,
) -> Result<(), StudyError> {
    let mut last_tick = Instant::now();
    app.tick();

    loop {
        terminal
            .draw(|frame| ui::render(frame, &app.snapshot, app.status.as_deref()))
            .map_err(|e| StudyError::Config(format!("Failed to draw: {e}")))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if let Some(action) = event::handle_events(timeout)? {
            match action {
                event::Action::Quit => break,
                event::Action::StartFocus => app.start_focus(),
                event::Action::TogglePause => app.toggle_pause(),
                event::Action::StartBreak => app.start_break(),
                event::Action::SkipBreak => app.skip_break(),
                event::Action::Stop => app.stop(),
                event::Action::Help => app.status = None,
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
