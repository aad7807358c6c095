//! The persisted timer record.
//!
//! `TimerState` is a flat record so the on-disk layout stays a plain JSON
//! object with one key per field. Invariants between the fields are checked
//! whenever a record is deserialized; a record that breaks them is refused
//! rather than loaded.

use std::fmt;
use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Accepted focus lengths, in minutes.
pub const FOCUS_MINUTES_RANGE: RangeInclusive<u32> = 1..=60;

/// Accepted short break lengths, in minutes.
pub const BREAK_MINUTES_RANGE: RangeInclusive<u32> = 1..=30;

/// Focus length of a fresh state.
pub const DEFAULT_FOCUS_MINUTES: u32 = 25;

/// Short break length of a fresh state.
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

/// Current phase of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    /// Nothing scheduled.
    #[default]
    Idle,
    /// A focus interval.
    Focus,
    /// A short or long break.
    Break,
}

impl TimerMode {
    /// Label for display.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Focus => "Focus",
            Self::Break => "Break",
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Focus => write!(f, "in focus"),
            Self::Break => write!(f, "on break"),
        }
    }
}

/// The single timer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimerState")]
pub struct TimerState {
    pub(crate) mode: TimerMode,
    pub(crate) running: bool,
    pub(crate) focus_duration_minutes: u32,
    pub(crate) break_duration_minutes: u32,
    pub(crate) anchor_timestamp: Option<DateTime<Utc>>,
    pub(crate) remaining_seconds_at_anchor: Option<u64>,
    pub(crate) external_session_id: Option<i64>,
    pub(crate) completed_focus_count: u32,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::with_durations(DEFAULT_FOCUS_MINUTES, DEFAULT_BREAK_MINUTES)
    }
}

impl TimerState {
    /// A fresh idle state with the given durations.
    ///
    /// Durations outside the accepted ranges are clamped into them.
    #[must_use]
    pub fn with_durations(focus_minutes: u32, break_minutes: u32) -> Self {
        Self {
            mode: TimerMode::Idle,
            running: false,
            focus_duration_minutes: clamp_into(focus_minutes, &FOCUS_MINUTES_RANGE),
            break_duration_minutes: clamp_into(break_minutes, &BREAK_MINUTES_RANGE),
            anchor_timestamp: None,
            remaining_seconds_at_anchor: None,
            external_session_id: None,
            completed_focus_count: 0,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Whether the countdown is advancing.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a countdown exists but is frozen.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        !self.running && self.remaining_seconds_at_anchor.is_some()
    }

    /// Configured focus length in minutes.
    #[must_use]
    pub const fn focus_duration_minutes(&self) -> u32 {
        self.focus_duration_minutes
    }

    /// Configured short break length in minutes.
    #[must_use]
    pub const fn break_duration_minutes(&self) -> u32 {
        self.break_duration_minutes
    }

    /// Instant the current running interval began.
    #[must_use]
    pub const fn anchor_timestamp(&self) -> Option<DateTime<Utc>> {
        self.anchor_timestamp
    }

    /// Countdown value at the anchor, or the frozen value while paused.
    #[must_use]
    pub const fn remaining_seconds_at_anchor(&self) -> Option<u64> {
        self.remaining_seconds_at_anchor
    }

    /// Session-log record backing the current focus interval.
    #[must_use]
    pub const fn external_session_id(&self) -> Option<i64> {
        self.external_session_id
    }

    /// Number of focus intervals completed so far.
    #[must_use]
    pub const fn completed_focus_count(&self) -> u32 {
        self.completed_focus_count
    }

    /// Reset every countdown field, leaving durations and the counter.
    pub(crate) fn clear_countdown(&mut self) {
        self.mode = TimerMode::Idle;
        self.running = false;
        self.anchor_timestamp = None;
        self.remaining_seconds_at_anchor = None;
        self.external_session_id = None;
    }

    /// Check the relationships between fields.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated invariant.
    pub fn validate(&self) -> Result<(), String> {
        if !FOCUS_MINUTES_RANGE.contains(&self.focus_duration_minutes) {
            return Err(format!(
                "focus_duration_minutes {} out of range",
                self.focus_duration_minutes
            ));
        }
        if !BREAK_MINUTES_RANGE.contains(&self.break_duration_minutes) {
            return Err(format!(
                "break_duration_minutes {} out of range",
                self.break_duration_minutes
            ));
        }
        if self.anchor_timestamp.is_some() && self.remaining_seconds_at_anchor.is_none() {
            return Err("anchor_timestamp set without remaining_seconds_at_anchor".to_string());
        }
        if self.running != self.anchor_timestamp.is_some() {
            return Err("running must match presence of anchor_timestamp".to_string());
        }
        if self.external_session_id.is_some() && self.mode != TimerMode::Focus {
            return Err("external_session_id set outside focus mode".to_string());
        }
        if self.mode == TimerMode::Idle && self.remaining_seconds_at_anchor.is_some() {
            return Err("idle state carries a countdown".to_string());
        }
        Ok(())
    }
}

/// Field-for-field mirror of [`TimerState`] used to validate on load.
#[derive(Deserialize)]
struct RawTimerState {
    mode: TimerMode,
    running: bool,
    focus_duration_minutes: u32,
    break_duration_minutes: u32,
    anchor_timestamp: Option<DateTime<Utc>>,
    remaining_seconds_at_anchor: Option<u64>,
    external_session_id: Option<i64>,
    #[serde(default)]
    completed_focus_count: u32,
}

impl TryFrom<RawTimerState> for TimerState {
    type Error = String;

    fn try_from(raw: RawTimerState) -> Result<Self, Self::Error> {
        let state = Self {
            mode: raw.mode,
            running: raw.running,
            focus_duration_minutes: raw.focus_duration_minutes,
            break_duration_minutes: raw.break_duration_minutes,
            anchor_timestamp: raw.anchor_timestamp,
            remaining_seconds_at_anchor: raw.remaining_seconds_at_anchor,
            external_session_id: raw.external_session_id,
            completed_focus_count: raw.completed_focus_count,
        };
        state.validate()?;
        Ok(state)
    }
}

fn clamp_into(value: u32, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_state() {
        let state = TimerState::default();

        assert_eq!(state.mode(), TimerMode::Idle);
        assert!(!state.is_running());
        assert_eq!(state.focus_duration_minutes(), 25);
        assert_eq!(state.break_duration_minutes(), 5);
        assert_eq!(state.anchor_timestamp(), None);
        assert_eq!(state.remaining_seconds_at_anchor(), None);
        assert_eq!(state.external_session_id(), None);
        assert_eq!(state.completed_focus_count(), 0);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_with_durations_clamps() {
        let state = TimerState::with_durations(0, 99);
        assert_eq!(state.focus_duration_minutes(), 1);
        assert_eq!(state.break_duration_minutes(), 30);
    }

    #[test]
    fn test_serialized_layout() {
        let value = serde_json::to_value(TimerState::default()).unwrap();

        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "anchor_timestamp",
                "break_duration_minutes",
                "completed_focus_count",
                "external_session_id",
                "focus_duration_minutes",
                "mode",
                "remaining_seconds_at_anchor",
                "running",
            ]
        );
        assert_eq!(value["mode"], "idle");
    }

    #[test]
    fn test_deserialize_running_state() {
        let json = r#"{
            "mode": "focus",
            "running": true,
            "focus_duration_minutes": 25,
            "break_duration_minutes": 5,
            "anchor_timestamp": "2024-03-01T09:00:00Z",
            "remaining_seconds_at_anchor": 1500,
            "external_session_id": 7,
            "completed_focus_count": 2
        }"#;

        let state: TimerState = serde_json::from_str(json).unwrap();

        assert_eq!(state.mode(), TimerMode::Focus);
        assert_eq!(
            state.anchor_timestamp(),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap())
        );
        assert_eq!(state.external_session_id(), Some(7));
        assert_eq!(state.completed_focus_count(), 2);
    }

    #[test]
    fn test_reject_anchor_without_remaining() {
        let json = r#"{
            "mode": "focus",
            "running": true,
            "focus_duration_minutes": 25,
            "break_duration_minutes": 5,
            "anchor_timestamp": "2024-03-01T09:00:00Z",
            "remaining_seconds_at_anchor": null,
            "external_session_id": null,
            "completed_focus_count": 0
        }"#;

        assert!(serde_json::from_str::<TimerState>(json).is_err());
    }

    #[test]
    fn test_reject_session_id_outside_focus() {
        let json = r#"{
            "mode": "break",
            "running": false,
            "focus_duration_minutes": 25,
            "break_duration_minutes": 5,
            "anchor_timestamp": null,
            "remaining_seconds_at_anchor": 100,
            "external_session_id": 3,
            "completed_focus_count": 1
        }"#;

        assert!(serde_json::from_str::<TimerState>(json).is_err());
    }

    #[test]
    fn test_reject_zero_duration() {
        let json = r#"{
            "mode": "idle",
            "running": false,
            "focus_duration_minutes": 0,
            "break_duration_minutes": 5,
            "anchor_timestamp": null,
            "remaining_seconds_at_anchor": null,
            "external_session_id": null,
            "completed_focus_count": 0
        }"#;

        assert!(serde_json::from_str::<TimerState>(json).is_err());
    }

    #[test]
    fn test_reject_running_without_anchor() {
        let json = r#"{
            "mode": "break",
            "running": true,
            "focus_duration_minutes": 25,
            "break_duration_minutes": 5,
            "anchor_timestamp": null,
            "remaining_seconds_at_anchor": 300,
            "external_session_id": null,
            "completed_focus_count": 0
        }"#;

        assert!(serde_json::from_str::<TimerState>(json).is_err());
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(TimerMode::Idle.to_string(), "idle");
        assert_eq!(TimerMode::Focus.to_string(), "in focus");
        assert_eq!(TimerMode::Break.display_name(), "Break");
    }
}
