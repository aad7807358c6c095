//! Rejections raised by the countdown store.

use std::fmt;

use thiserror::Error;

use super::state::TimerMode;

/// Which configurable duration a value was meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationKind {
    /// Focus interval length.
    Focus,
    /// Short break length.
    Break,
    /// Length of a countdown handed to `start_focus`/`start_break`.
    Countdown,
}

impl fmt::Display for DurationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Focus => write!(f, "focus duration"),
            Self::Break => write!(f, "break duration"),
            Self::Countdown => write!(f, "countdown"),
        }
    }
}

/// An operation the store refused. State is untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// The operation is not valid for the current mode/running combination.
    #[error("cannot {operation} while {mode}{}", if *running { " (running)" } else { "" })]
    InvalidTransition {
        /// Operation that was attempted.
        operation: &'static str,
        /// Mode at the time of the call.
        mode: TimerMode,
        /// Whether the countdown was running.
        running: bool,
    },

    /// A duration outside the accepted bounds.
    #[error("{kind} {value} is outside the accepted range {min}-{max}")]
    OutOfRangeDuration {
        /// Which duration was being set.
        kind: DurationKind,
        /// Offending value.
        value: u64,
        /// Smallest accepted value.
        min: u64,
        /// Largest accepted value.
        max: u64,
    },
}
