//! Application state for the TUI.

use crate::controller::{PomodoroController, TickEvent, TimerSnapshot};
use crate::core::Clock;
use crate::error::StudyError;
use crate::sessions::SessionBackend;
use crate::timer::{StatePersistence, TimerMode};

/// Application state.
pub struct App<'a, B, C, P> {
    controller: &'a mut PomodoroController<B, C, P>,
    /// Timer as of the last refresh.
    pub snapshot: TimerSnapshot,
    /// Status message to display.
    pub status: Option<String>,
}

impl<'a, B: SessionBackend, C: Clock, P: StatePersistence> App<'a, B, C, P> {
    /// Create a new app instance.
    pub fn new(controller: &'a mut PomodoroController<B, C, P>) -> Self {
        let snapshot = controller.snapshot();
        Self {
            controller,
            snapshot,
            status: Some("Press ? for help".to_string()),
        }
    }

    /// Advance the timer and take a new snapshot. A failed completion is
    /// shown in the status bar; the controller has already stopped the timer.
    pub fn tick(&mut self) {
        let result = match self.controller.tick() {
            Ok(TickEvent::FocusCompleted(outcome)) => Ok(format!(
                "Focus interval #{} done! {} min {}",
                outcome.completed_focus_count,
                outcome.break_minutes,
                outcome.break_kind.display_name().to_lowercase()
            )),
            Ok(TickEvent::BreakFinished) => Ok("Break is over. Press s to focus".to_string()),
            Ok(TickEvent::Idle | TickEvent::Paused { .. } | TickEvent::Counting { .. }) => {
                self.snapshot = self.controller.snapshot();
                return;
            }
            Err(e) => Err(e),
        };
        self.report(result);
    }

    /// Start a focus interval.
    pub fn start_focus(&mut self) {
        let result = self.controller.start_focus().map(|r| format!("Session #{} started", r.id));
        self.report(result);
    }

    /// Pause when running, resume when paused.
    pub fn toggle_pause(&mut self) {
        let result = if self.snapshot.running {
            self.controller.pause().map(|()| "Paused".to_string())
        } else {
            self.controller.resume().map(|()| "Resumed".to_string())
        };
        self.report(result);
    }

    /// Start the earned break.
    pub fn start_break(&mut self) {
        let result = self
            .controller
            .start_break()
            .map(|m| format!("{m} min break started"));
        self.report(result);
    }

    /// Skip the current break.
    pub fn skip_break(&mut self) {
        let result = self.controller.skip_break().map(|()| "Break skipped".to_string());
        self.report(result);
    }

    /// Stop whatever is active.
    pub fn stop(&mut self) {
        if self.snapshot.mode == TimerMode::Idle {
            self.status = Some("Nothing to stop".to_string());
            return;
        }
        self.controller.stop();
        self.report(Ok("Stopped".to_string()));
    }

    /// Show an operation's outcome and refresh the snapshot.
    fn report(&mut self, result: Result<String, StudyError>) {
        self.status = Some(match result {
            Ok(message) => message,
            Err(e) => e.to_string(),
        });
        self.snapshot = self.controller.snapshot();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing::controller;
    use crate::core::ManualClock;
    use crate::sessions::{FocusRecord, MockSessionBackend};
    use crate::timer::{BreakPolicy, CountdownStore, MemoryState, TimerState};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_keys_drive_controller() {
        let (clock, mut controller) = controller();
        let mut app = App::new(&mut controller);

        app.start_focus();
        assert_eq!(app.snapshot.mode, TimerMode::Focus);
        assert_eq!(app.status.as_deref(), Some("Session #1 started"));

        clock.advance_secs(5);
        app.tick();
        assert_eq!(app.snapshot.remaining_seconds, 1495);

        app.toggle_pause();
        assert!(app.snapshot.paused);
        app.toggle_pause();
        assert!(app.snapshot.running);

        app.stop();
        assert_eq!(app.snapshot.mode, TimerMode::Idle);
    }

    #[test]
    fn test_rejected_action_shows_error() {
        let (_, mut controller) = controller();
        let mut app = App::new(&mut controller);

        app.toggle_pause();

        assert_eq!(app.status.as_deref(), Some("cannot resume while idle"));
    }

    #[test]
    fn test_tick_reports_completion() {
        let (clock, mut controller) = controller();
        let mut app = App::new(&mut controller);

        app.start_focus();
        clock.advance_secs(1500);
        app.tick();

        assert_eq!(app.snapshot.mode, TimerMode::Break);
        assert_eq!(
            app.status.as_deref(),
            Some("Focus interval #1 done! 5 min break")
        );
    }

    #[test]
    fn test_failed_completion_shows_error_and_keeps_running() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let mut backend = MockSessionBackend::new();
        backend.expect_create().returning(move |draft| {
            Ok(FocusRecord {
                id: 7,
                duration_minutes: draft.duration_minutes,
                completed: false,
                created_at: start,
            })
        });
        backend
            .expect_update()
            .returning(|_, _| Err(StudyError::Database("database is locked".to_string())));
        let clock = ManualClock::new(start);
        let store = CountdownStore::open(clock.clone(), MemoryState::default(), TimerState::default());
        let mut controller = PomodoroController::new(store, backend, BreakPolicy::default());
        let mut app = App::new(&mut controller);

        app.start_focus();
        clock.advance_secs(1500);
        app.tick();

        assert_eq!(app.snapshot.mode, TimerMode::Idle);
        assert!(app.status.as_deref().unwrap().contains("database is locked"));

        app.tick();
        assert_eq!(app.snapshot.mode, TimerMode::Idle);
        app.start_focus();
        assert_eq!(app.snapshot.mode, TimerMode::Focus);
    }
}
