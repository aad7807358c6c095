//! Focus session reports.
//!
//! Summarizes the session log: totals over completed sessions and a
//! seven-day breakdown ending today.

use chrono::{Duration, Local, NaiveDate};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::record::FocusRecord;
use crate::core::{format_minutes, render_progress_bar};

/// Days covered by the daily breakdown.
pub const REPORT_DAYS: i64 = 7;

/// Focus totals for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyFocus {
    /// Local calendar date.
    pub date: NaiveDate,
    /// Completed sessions that day.
    pub sessions: u32,
    /// Focus minutes that day.
    pub minutes: u64,
}

/// Focus report data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusReport {
    /// Number of completed sessions.
    pub total_sessions: u32,
    /// Sum of completed session lengths in minutes.
    pub total_focus_minutes: u64,
    /// Rounded mean session length in minutes (0 with no sessions).
    pub average_session_minutes: u64,
    /// Oldest day first, ending with `today`.
    pub daily: Vec<DailyFocus>,
}

impl FocusReport {
    /// Build a report from records, with the breakdown ending on `today`.
    ///
    /// Sessions that were stopped early are ignored.
    #[must_use]
    pub fn generate(records: &[FocusRecord], today: NaiveDate) -> Self {
        let completed: Vec<&FocusRecord> = records.iter().filter(|r| r.completed).collect();

        let total_sessions = u32::try_from(completed.len()).unwrap_or(u32::MAX);
        let total_focus_minutes: u64 = completed
            .iter()
            .map(|r| u64::from(r.duration_minutes))
            .sum();
        let average_session_minutes = if total_sessions == 0 {
            0
        } else {
            let n = u64::from(total_sessions);
            (total_focus_minutes + n / 2) / n
        };

        let daily = (0..REPORT_DAYS)
            .rev()
            .map(|days_ago| {
                let date = today - Duration::days(days_ago);
                let on_date = completed
                    .iter()
                    .filter(|r| r.created_at_local().date_naive() == date);
                let (sessions, minutes) = on_date.fold((0u32, 0u64), |(s, m), r| {
                    (s + 1, m + u64::from(r.duration_minutes))
                });
                DailyFocus {
                    date,
                    sessions,
                    minutes,
                }
            })
            .collect();

        Self {
            total_sessions,
            total_focus_minutes,
            average_session_minutes,
            daily,
        }
    }

    /// Build a report ending on the local current date.
    #[must_use]
    pub fn generate_today(records: &[FocusRecord]) -> Self {
        Self::generate(records, Local::now().date_naive())
    }

    /// Format the report for terminal display.
    #[must_use]
    pub fn format(&self) -> String {
        let mut lines = Vec::new();

        lines.push("📊 Focus Report".bold().to_string());
        lines.push("═".repeat(40));
        lines.push(format!("Total sessions:   {}", self.total_sessions));
        lines.push(format!(
            "Total focus time: {}",
            format_minutes(self.total_focus_minutes)
        ));
        lines.push(format!(
            "Average session:  {} min",
            self.average_session_minutes
        ));
        lines.push(String::new());
        lines.push(format!("Last {REPORT_DAYS} days").bold().to_string());
        lines.push("─".repeat(40));

        let busiest = self.daily.iter().map(|d| d.minutes).max().unwrap_or(0);
        for day in &self.daily {
            #[allow(clippy::cast_precision_loss)]
            let ratio = if busiest == 0 {
                0.0
            } else {
                day.minutes as f64 / busiest as f64
            };
            lines.push(format!(
                "{}  {} {:>2} sessions {:>4} min",
                day.date.format("%b %d"),
                render_progress_bar(ratio, 12),
                day.sessions,
                day.minutes
            ));
        }

        lines.join("\n")
    }
}
