//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::error::StudyError;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start a focus interval.
    StartFocus,
    /// Pause or resume.
    TogglePause,
    /// Start the earned break.
    StartBreak,
    /// Skip the current break.
    SkipBreak,
    /// Stop whatever is active.
    Stop,
    /// Show key help.
    Help,
}

/// Wait up to `timeout` for a key press.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(timeout: Duration) -> Result<Option<Action>, StudyError> {
    if !event::poll(timeout).map_err(|e| StudyError::Config(format!("Event poll failed: {e}")))? {
        return Ok(None);
    }

    let Event::Key(key) =
        event::read().map_err(|e| StudyError::Config(format!("Event read failed: {e}")))?
    else {
        return Ok(None);
    };
    if key.kind != KeyEventKind::Press {
        return Ok(None);
    }

    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(Some(Action::Quit));
    }

    Ok(action_for(key.code))
}

/// Key bindings.
const fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('s') => Some(Action::StartFocus),
        KeyCode::Char('p' | ' ') => Some(Action::TogglePause),
        KeyCode::Char('b') => Some(Action::StartBreak),
        KeyCode::Char('k') => Some(Action::SkipBreak),
        KeyCode::Char('x') => Some(Action::Stop),
        KeyCode::Char('?') => Some(Action::Help),
        _ => None,
    }
}
