//! The countdown session store.
//!
//! Owns the one [`TimerState`] of an application session. Remaining time is
//! computed from the anchor on every read, never decremented, so a process
//! that exits mid-interval and starts again later reads the right value from
//! the saved anchor. Each successful mutation ends with an explicit save.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::core::Clock;

use super::error::{DurationKind, TimerError};
use super::persist::StatePersistence;
use super::state::{TimerMode, TimerState, BREAK_MINUTES_RANGE, FOCUS_MINUTES_RANGE};

/// Longest countdown `start_focus`/`start_break` accept: one day.
pub const MAX_COUNTDOWN_SECS: u64 = 24 * 60 * 60;

/// Single source of truth for the active timer.
#[derive(Debug)]
pub struct CountdownStore<C, P> {
    state: TimerState,
    clock: C,
    persistence: P,
}

impl<C: Clock, P: StatePersistence> CountdownStore<C, P> {
    /// Open the store, loading the saved state.
    ///
    /// When nothing was saved, or the saved record cannot be read, `fresh`
    /// is used instead. An unreadable record is logged and overwritten on the
    /// next mutation.
    pub fn open(clock: C, persistence: P, fresh: TimerState) -> Self {
        let state = match persistence.load() {
            Ok(Some(state)) => {
                debug!(mode = ?state.mode(), running = state.is_running(), "loaded timer state");
                state
            }
            Ok(None) => fresh,
            Err(e) => {
                warn!(error = %e, "discarding unreadable timer state");
                fresh
            }
        };

        Self::with_state(clock, persistence, state)
    }

    /// Build a store around an existing state without touching persistence.
    pub fn with_state(clock: C, persistence: P, state: TimerState) -> Self {
        Self {
            state,
            clock,
            persistence,
        }
    }

    /// Current record.
    #[must_use]
    pub const fn state(&self) -> &TimerState {
        &self.state
    }

    /// Set the focus length.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless idle; `OutOfRangeDuration` outside 1-60.
    pub fn configure_focus_duration(&mut self, minutes: u32) -> Result<(), TimerError> {
        self.require_configurable("configure the focus duration")?;
        check_minutes(DurationKind::Focus, minutes, FOCUS_MINUTES_RANGE)?;

        self.state.focus_duration_minutes = minutes;
        debug!(minutes, "focus duration configured");
        self.save();
        Ok(())
    }

    /// Set the short break length.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless idle; `OutOfRangeDuration` outside 1-30.
    pub fn configure_break_duration(&mut self, minutes: u32) -> Result<(), TimerError> {
        self.require_configurable("configure the break duration")?;
        check_minutes(DurationKind::Break, minutes, BREAK_MINUTES_RANGE)?;

        self.state.break_duration_minutes = minutes;
        debug!(minutes, "break duration configured");
        self.save();
        Ok(())
    }

    /// Begin a focus interval of `duration_seconds`.
    ///
    /// The session-log record should already exist; its id is kept so the
    /// interval can be closed against it later.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless idle; `OutOfRangeDuration` for a zero or
    /// over-long countdown.
    pub fn start_focus(
        &mut self,
        external_session_id: Option<i64>,
        duration_seconds: u64,
    ) -> Result<(), TimerError> {
        if self.state.mode != TimerMode::Idle {
            return Err(self.invalid("start a focus interval"));
        }
        check_countdown(duration_seconds)?;

        let now = self.clock.now();
        self.state.mode = TimerMode::Focus;
        self.anchor(now, duration_seconds);
        self.state.external_session_id = external_session_id;

        info!(
            session_id = ?external_session_id,
            duration_seconds, "focus interval started"
        );
        self.save();
        Ok(())
    }

    /// Begin a break of `duration_seconds`.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` during focus or while a countdown is running;
    /// `OutOfRangeDuration` for a zero or over-long countdown.
    pub fn start_break(&mut self, duration_seconds: u64) -> Result<(), TimerError> {
        if self.state.mode == TimerMode::Focus || self.state.running {
            return Err(self.invalid("start a break"));
        }
        check_countdown(duration_seconds)?;

        let now = self.clock.now();
        self.state.mode = TimerMode::Break;
        self.anchor(now, duration_seconds);
        self.state.external_session_id = None;

        info!(duration_seconds, "break started");
        self.save();
        Ok(())
    }

    /// Freeze the countdown.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` when not running.
    pub fn pause(&mut self) -> Result<(), TimerError> {
        if !self.state.running {
            return Err(self.invalid("pause"));
        }

        let remaining = self.remaining_seconds();
        self.state.running = false;
        self.state.anchor_timestamp = None;
        self.state.remaining_seconds_at_anchor = Some(remaining);

        debug!(remaining, mode = ?self.state.mode, "countdown paused");
        self.save();
        Ok(())
    }

    /// Continue a paused countdown from where it was frozen.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` when running, idle, or when nothing is left.
    pub fn resume(&mut self) -> Result<(), TimerError> {
        if self.state.running || self.state.mode == TimerMode::Idle {
            return Err(self.invalid("resume"));
        }

        let remaining = self.state.remaining_seconds_at_anchor.unwrap_or(0);
        if remaining == 0 {
            return Err(self.invalid("resume a finished countdown"));
        }

        let now = self.clock.now();
        self.anchor(now, remaining);

        debug!(remaining, mode = ?self.state.mode, "countdown resumed");
        self.save();
        Ok(())
    }

    /// Reset to idle from any state. The completed-focus counter is kept.
    ///
    /// Calling it while idle changes and writes nothing.
    pub fn stop(&mut self) {
        if self.state.mode == TimerMode::Idle {
            return;
        }

        info!(mode = ?self.state.mode, "timer stopped");
        self.state.clear_countdown();
        self.save();
    }

    /// Record a finished focus interval and reset to idle.
    ///
    /// Returns the updated completed-focus count. The break is not started
    /// here; the caller picks its length from the returned count.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` outside focus mode.
    pub fn complete_focus(&mut self) -> Result<u32, TimerError> {
        if self.state.mode != TimerMode::Focus {
            return Err(self.invalid("complete a focus interval"));
        }

        self.state.completed_focus_count = self.state.completed_focus_count.saturating_add(1);
        self.state.clear_countdown();

        info!(
            completed = self.state.completed_focus_count,
            "focus interval completed"
        );
        self.save();
        Ok(self.state.completed_focus_count)
    }

    /// End a break early. A no-op while idle.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` during focus, which this must never cancel.
    pub fn skip_break(&mut self) -> Result<(), TimerError> {
        match self.state.mode {
            TimerMode::Break => {
                info!("break skipped");
                self.state.clear_countdown();
                self.save();
                Ok(())
            }
            TimerMode::Idle => Ok(()),
            TimerMode::Focus => Err(self.invalid("skip a break")),
        }
    }

    /// Seconds left on the countdown. Never negative, never mutates.
    ///
    /// While running this is derived from the anchor; while paused it is the
    /// frozen value; with no countdown it is the configured length of the
    /// current mode.
    #[must_use]
    pub fn remaining_seconds(&self) -> u64 {
        match (
            self.state.anchor_timestamp,
            self.state.remaining_seconds_at_anchor,
        ) {
            (Some(anchor), Some(at_anchor)) => at_anchor.saturating_sub(self.elapsed_since(anchor)),
            (None, Some(frozen)) => frozen,
            _ => self.configured_seconds(),
        }
    }

    /// Configured length of the current mode, in seconds.
    #[must_use]
    pub fn configured_seconds(&self) -> u64 {
        let minutes = match self.state.mode {
            TimerMode::Break => self.state.break_duration_minutes,
            TimerMode::Idle | TimerMode::Focus => self.state.focus_duration_minutes,
        };
        u64::from(minutes) * 60
    }

    /// Whole seconds between `anchor` and now; zero if the clock went back.
    fn elapsed_since(&self, anchor: DateTime<Utc>) -> u64 {
        let elapsed = self.clock.now().signed_duration_since(anchor).num_seconds();
        u64::try_from(elapsed).unwrap_or(0)
    }

    fn anchor(&mut self, at: DateTime<Utc>, remaining: u64) {
        self.state.running = true;
        self.state.anchor_timestamp = Some(at);
        self.state.remaining_seconds_at_anchor = Some(remaining);
    }

    fn require_configurable(&self, operation: &'static str) -> Result<(), TimerError> {
        if self.state.running || self.state.mode != TimerMode::Idle {
            return Err(self.invalid(operation));
        }
        Ok(())
    }

    fn invalid(&self, operation: &'static str) -> TimerError {
        debug!(operation, mode = ?self.state.mode, running = self.state.running, "rejected");
        TimerError::InvalidTransition {
            operation,
            mode: self.state.mode,
            running: self.state.running,
        }
    }

    fn save(&self) {
        if let Err(e) = self.persistence.save(&self.state) {
            warn!(error = %e, "failed to persist timer state");
        }
    }
}

fn check_minutes(
    kind: DurationKind,
    minutes: u32,
    range: std::ops::RangeInclusive<u32>,
) -> Result<(), TimerError> {
    if range.contains(&minutes) {
        return Ok(());
    }
    Err(TimerError::OutOfRangeDuration {
        kind,
        value: u64::from(minutes),
        min: u64::from(*range.start()),
        max: u64::from(*range.end()),
    })
}

const fn check_countdown(seconds: u64) -> Result<(), TimerError> {
    if seconds == 0 || seconds > MAX_COUNTDOWN_SECS {
        return Err(TimerError::OutOfRangeDuration {
            kind: DurationKind::Countdown,
            value: seconds,
            min: 1,
            max: MAX_COUNTDOWN_SECS,
        });
    }
    Ok(())
}
