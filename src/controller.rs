//! Pomodoro controller.
//!
//! Drives a [`CountdownStore`] on behalf of a user interface: opens and
//! closes session-log records around focus intervals, picks break lengths
//! from the [`BreakPolicy`], and turns the once-a-second refresh into
//! completions.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::Clock;
use crate::error::StudyError;
use crate::sessions::{FocusRecord, FocusRecordPatch, NewFocusRecord, SessionBackend};
use crate::timer::{
    BreakKind, BreakPolicy, CountdownStore, DurationKind, StatePersistence, TimerError, TimerMode,
    TimerState, MAX_COUNTDOWN_SECS,
};

/// Result of completing a focus interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionOutcome {
    /// Completed focus intervals so far, this one included.
    pub completed_focus_count: u32,
    /// Length of the break that follows, in minutes.
    pub break_minutes: u32,
    /// Short or long break.
    pub break_kind: BreakKind,
    /// Whether that break is already counting down.
    pub break_started: bool,
}

/// What one refresh observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TickEvent {
    /// No countdown.
    Idle,
    /// A countdown exists but is frozen.
    Paused { remaining_seconds: u64 },
    /// A countdown is running.
    Counting { remaining_seconds: u64 },
    /// A running focus interval reached zero and was completed.
    FocusCompleted(CompletionOutcome),
    /// A running break reached zero and the timer went idle.
    BreakFinished,
}

/// Serializable view of the timer for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub running: bool,
    pub paused: bool,
    pub remaining_seconds: u64,
    /// Length of the current interval (or the next focus interval when idle).
    pub total_seconds: u64,
    /// Fraction of the current interval already elapsed, 0.0 to 1.0.
    pub progress: f64,
    pub session_id: Option<i64>,
    pub completed_focus_count: u32,
    pub focus_duration_minutes: u32,
    pub break_duration_minutes: u32,
    /// The current break's length during a break; otherwise the length of
    /// the break earned by the next completed focus interval.
    pub break_minutes: u32,
    pub long_break: bool,
}

/// Coordinates the countdown store with the session log.
pub struct PomodoroController<B, C, P> {
    store: CountdownStore<C, P>,
    backend: B,
    policy: BreakPolicy,
    auto_start_break: bool,
}

impl<B: SessionBackend, C: Clock, P: StatePersistence> PomodoroController<B, C, P> {
    /// Create a controller. Breaks start automatically after a completed
    /// focus interval unless turned off with [`Self::with_auto_start_break`].
    pub const fn new(store: CountdownStore<C, P>, backend: B, policy: BreakPolicy) -> Self {
        Self {
            store,
            backend,
            policy,
            auto_start_break: true,
        }
    }

    /// Whether `tick` starts the break when a focus interval runs out.
    #[must_use]
    pub fn with_auto_start_break(mut self, auto_start_break: bool) -> Self {
        self.auto_start_break = auto_start_break;
        self
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &CountdownStore<C, P> {
        &self.store
    }

    /// The session log.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// The break policy in use.
    #[must_use]
    pub const fn policy(&self) -> &BreakPolicy {
        &self.policy
    }

    fn state(&self) -> &TimerState {
        self.store.state()
    }

    /// Drop a persisted session reference the log no longer knows about.
    ///
    /// Returns `true` when the timer was reset. Lookup failures are logged
    /// and leave the timer alone.
    pub fn restore(&mut self) -> bool {
        let Some(id) = self.state().external_session_id() else {
            return false;
        };

        match self.backend.get(id) {
            Ok(Some(_)) => false,
            Ok(None) => {
                warn!(session_id = id, "saved timer refers to a missing session; resetting");
                self.store.stop();
                true
            }
            Err(e) => {
                warn!(session_id = id, error = %e, "could not verify saved session");
                false
            }
        }
    }

    /// Log a new session record and start its focus countdown.
    ///
    /// # Errors
    ///
    /// `Timer` when a countdown is already active (no record is written);
    /// any backend error from creating the record.
    pub fn start_focus(&mut self) -> Result<FocusRecord, StudyError> {
        let state = self.state();
        if state.mode() != TimerMode::Idle {
            return Err(TimerError::InvalidTransition {
                operation: "start a focus interval",
                mode: state.mode(),
                running: state.is_running(),
            }
            .into());
        }

        let minutes = state.focus_duration_minutes();
        let record = self.backend.create(NewFocusRecord::pending(minutes))?;
        debug!(session_id = record.id, minutes, "session record created");

        self.store
            .start_focus(Some(record.id), u64::from(minutes) * 60)?;
        Ok(record)
    }

    /// # Errors
    ///
    /// `Timer` when nothing is running.
    pub fn pause(&mut self) -> Result<(), StudyError> {
        Ok(self.store.pause()?)
    }

    /// # Errors
    ///
    /// `Timer` when there is no paused countdown.
    pub fn resume(&mut self) -> Result<(), StudyError> {
        Ok(self.store.resume()?)
    }

    /// Abandon whatever is active. An open focus record is marked not
    /// completed; if that write fails the timer still stops.
    pub fn stop(&mut self) {
        if let Some(id) = self.state().external_session_id() {
            if let Err(e) = self.backend.update(id, FocusRecordPatch::completed(false)) {
                warn!(session_id = id, error = %e, "failed to close session record");
            }
        }
        self.store.stop();
    }

    /// Mark the current focus interval completed.
    ///
    /// The session record is written first. If that fails the timer is
    /// stopped and the error returned, so no interval is counted without a
    /// record. With `start_break` the recommended break begins at once.
    ///
    /// # Errors
    ///
    /// `Timer` outside focus mode, or when the break to start is not a valid
    /// countdown (checked before anything is written); any backend error
    /// from the update.
    pub fn complete_focus(&mut self, start_break: bool) -> Result<CompletionOutcome, StudyError> {
        let state = self.state();
        if state.mode() != TimerMode::Focus {
            return Err(TimerError::InvalidTransition {
                operation: "complete a focus interval",
                mode: state.mode(),
                running: state.is_running(),
            }
            .into());
        }

        let count = state.completed_focus_count().saturating_add(1);
        let break_minutes = self
            .policy
            .recommended_break_minutes(count, state.break_duration_minutes());
        let break_kind = self.policy.break_kind(count);
        let break_secs = u64::from(break_minutes) * 60;
        if start_break && !(1..=MAX_COUNTDOWN_SECS).contains(&break_secs) {
            return Err(TimerError::OutOfRangeDuration {
                kind: DurationKind::Countdown,
                value: break_secs,
                min: 1,
                max: MAX_COUNTDOWN_SECS,
            }
            .into());
        }

        if let Some(id) = state.external_session_id() {
            if let Err(e) = self.backend.update(id, FocusRecordPatch::completed(true)) {
                warn!(session_id = id, error = %e, "failed to record completion; stopping");
                self.store.stop();
                return Err(e);
            }
        }

        let count = self.store.complete_focus()?;
        if start_break {
            self.store.start_break(break_secs)?;
        }

        info!(count, break_minutes, ?break_kind, "focus interval recorded");
        Ok(CompletionOutcome {
            completed_focus_count: count,
            break_minutes,
            break_kind,
            break_started: start_break,
        })
    }

    /// Start the break recommended for the current completed count.
    ///
    /// Returns its length in minutes.
    ///
    /// # Errors
    ///
    /// `Timer` during focus or while a countdown runs.
    pub fn start_break(&mut self) -> Result<u32, StudyError> {
        let minutes = self.recommended_break_minutes();
        self.store.start_break(u64::from(minutes) * 60)?;
        Ok(minutes)
    }

    /// # Errors
    ///
    /// `Timer` during focus.
    pub fn skip_break(&mut self) -> Result<(), StudyError> {
        Ok(self.store.skip_break()?)
    }

    /// # Errors
    ///
    /// `Timer` unless idle or when out of range.
    pub fn configure_focus_duration(&mut self, minutes: u32) -> Result<(), StudyError> {
        Ok(self.store.configure_focus_duration(minutes)?)
    }

    /// # Errors
    ///
    /// `Timer` unless idle or when out of range.
    pub fn configure_break_duration(&mut self, minutes: u32) -> Result<(), StudyError> {
        Ok(self.store.configure_break_duration(minutes)?)
    }

    /// The once-a-second refresh.
    ///
    /// A running focus interval at zero is completed; a running break at
    /// zero returns the timer to idle.
    ///
    /// # Errors
    ///
    /// Backend errors from completing a focus interval.
    pub fn tick(&mut self) -> Result<TickEvent, StudyError> {
        let remaining_seconds = self.store.remaining_seconds();
        let state = self.state();

        if state.mode() == TimerMode::Idle {
            return Ok(TickEvent::Idle);
        }
        if !state.is_running() {
            return Ok(TickEvent::Paused { remaining_seconds });
        }
        if remaining_seconds > 0 {
            return Ok(TickEvent::Counting { remaining_seconds });
        }

        match state.mode() {
            TimerMode::Focus => {
                let outcome = self.complete_focus(self.auto_start_break)?;
                Ok(TickEvent::FocusCompleted(outcome))
            }
            TimerMode::Break | TimerMode::Idle => {
                info!("break finished");
                self.store.stop();
                Ok(TickEvent::BreakFinished)
            }
        }
    }

    /// Break length earned by the current completed count.
    #[must_use]
    pub const fn recommended_break_minutes(&self) -> u32 {
        let state = self.store.state();
        self.policy.recommended_break_minutes(
            state.completed_focus_count(),
            state.break_duration_minutes(),
        )
    }

    /// Current view for display.
    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        let state = self.state();
        let remaining_seconds = self.store.remaining_seconds();
        let count = state.completed_focus_count();

        let break_count = match state.mode() {
            TimerMode::Break => count,
            TimerMode::Idle | TimerMode::Focus => count.saturating_add(1),
        };
        let break_minutes = self
            .policy
            .recommended_break_minutes(break_count, state.break_duration_minutes());

        let total_seconds = match state.mode() {
            TimerMode::Break => u64::from(break_minutes) * 60,
            TimerMode::Idle | TimerMode::Focus => self.store.configured_seconds(),
        }
        .max(remaining_seconds);

        #[allow(clippy::cast_precision_loss)]
        let progress = if state.mode() == TimerMode::Idle || total_seconds == 0 {
            0.0
        } else {
            (1.0 - remaining_seconds as f64 / total_seconds as f64).clamp(0.0, 1.0)
        };

        TimerSnapshot {
            mode: state.mode(),
            running: state.is_running(),
            paused: state.is_paused(),
            remaining_seconds,
            total_seconds,
            progress,
            session_id: state.external_session_id(),
            completed_focus_count: count,
            focus_duration_minutes: state.focus_duration_minutes(),
            break_duration_minutes: state.break_duration_minutes(),
            break_minutes,
            long_break: state.mode() == TimerMode::Break
                && self.policy.break_kind(count) == BreakKind::Long,
        }
    }
}
