//! Break length policy.
//!
//! The store only counts completed focus intervals. Which break follows is
//! decided here, from that count, by whoever drives the timer.

use serde::{Deserialize, Serialize};

/// Long break length used when nothing is configured.
pub const DEFAULT_LONG_BREAK_MINUTES: u32 = 15;

/// Completed focus intervals per long break when nothing is configured.
pub const DEFAULT_LONG_BREAK_INTERVAL: u32 = 4;

/// Short or long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakKind {
    /// The configured short break.
    Short,
    /// The extended break granted every few focus intervals.
    Long,
}

impl BreakKind {
    /// Label for display.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Short => "Break",
            Self::Long => "Long Break",
        }
    }
}

/// Long-break cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakPolicy {
    /// Length of a long break in minutes.
    pub long_break_minutes: u32,
    /// A long break follows every this many completed focus intervals.
    pub long_break_interval: u32,
}

impl Default for BreakPolicy {
    fn default() -> Self {
        Self {
            long_break_minutes: DEFAULT_LONG_BREAK_MINUTES,
            long_break_interval: DEFAULT_LONG_BREAK_INTERVAL,
        }
    }
}

impl BreakPolicy {
    /// Which break is due after `completed_focus_count` intervals.
    ///
    /// An interval of zero disables long breaks.
    #[must_use]
    pub const fn break_kind(&self, completed_focus_count: u32) -> BreakKind {
        if self.long_break_interval > 0
            && completed_focus_count > 0
            && completed_focus_count % self.long_break_interval == 0
        {
            BreakKind::Long
        } else {
            BreakKind::Short
        }
    }

    /// Break length in minutes after `completed_focus_count` intervals.
    #[must_use]
    pub const fn recommended_break_minutes(
        &self,
        completed_focus_count: u32,
        short_break_minutes: u32,
    ) -> u32 {
        match self.break_kind(completed_focus_count) {
            BreakKind::Long => self.long_break_minutes,
            BreakKind::Short => short_break_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_fourth_interval_is_long() {
        let policy = BreakPolicy::default();

        assert_eq!(policy.recommended_break_minutes(1, 5), 5);
        assert_eq!(policy.recommended_break_minutes(3, 5), 5);
        assert_eq!(policy.recommended_break_minutes(4, 5), 15);
        assert_eq!(policy.recommended_break_minutes(5, 5), 5);
        assert_eq!(policy.recommended_break_minutes(8, 5), 15);
    }

    #[test]
    fn test_zero_count_is_short() {
        let policy = BreakPolicy::default();
        assert_eq!(policy.break_kind(0), BreakKind::Short);
    }

    #[test]
    fn test_custom_cadence() {
        let policy = BreakPolicy {
            long_break_minutes: 20,
            long_break_interval: 2,
        };

        assert_eq!(policy.recommended_break_minutes(2, 5), 20);
        assert_eq!(policy.recommended_break_minutes(3, 5), 5);
    }

    #[test]
    fn test_zero_interval_disables_long_breaks() {
        let policy = BreakPolicy {
            long_break_minutes: 20,
            long_break_interval: 0,
        };

        assert_eq!(policy.break_kind(4), BreakKind::Short);
    }
}
