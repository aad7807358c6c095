use colored::Colorize;

use crate::controller::{CompletionOutcome, TimerSnapshot};
use crate::core::{format_minutes, format_mmss, render_progress_bar};
use crate::sessions::FocusRecord;
use crate::timer::TimerMode;

/// Heading for the current phase.
#[must_use]
pub fn snapshot_label(snapshot: &TimerSnapshot) -> &'static str {
    match snapshot.mode {
        TimerMode::Idle => "Ready",
        TimerMode::Focus => "Focus",
        TimerMode::Break if snapshot.long_break => "Long Break",
        TimerMode::Break => "Break",
    }
}

/// Format the timer for the terminal.
pub fn format_snapshot_pretty(snapshot: &TimerSnapshot) -> String {
    let icon = match (snapshot.mode, snapshot.running) {
        (TimerMode::Idle, _) => "⏹️",
        (_, false) => "⏸️",
        (TimerMode::Focus, true) => "🎯",
        (TimerMode::Break, true) => "☕",
    };

    let mut output = Vec::new();
    let mut heading = format!("{icon} {}", snapshot_label(snapshot));
    if snapshot.paused {
        heading.push_str(" (paused)");
    }
    output.push(heading.bold().to_string());
    output.push("─".repeat(40));

    let clock = format_mmss(snapshot.remaining_seconds);
    let clock = match snapshot.mode {
        TimerMode::Focus => clock.green().bold(),
        TimerMode::Break => clock.cyan().bold(),
        TimerMode::Idle => clock.normal(),
    };
    output.push(format!("Remaining: {clock}"));

    if snapshot.mode != TimerMode::Idle {
        output.push(format!(
            "Progress:  {} {:.0}%",
            render_progress_bar(snapshot.progress, 20),
            snapshot.progress * 100.0
        ));
    }

    if let Some(id) = snapshot.session_id {
        output.push(format!("Session:   #{id}"));
    }

    output.push(format!(
        "Completed: {} focus interval{}",
        snapshot.completed_focus_count,
        if snapshot.completed_focus_count == 1 { "" } else { "s" }
    ));

    output.push(String::new());
    let hint = match (snapshot.mode, snapshot.running) {
        (TimerMode::Idle, _) => format!(
            "Next break: {} min. Start with 'studyfocus start'",
            snapshot.break_minutes
        ),
        (_, false) => "Continue with 'studyfocus resume'".to_string(),
        (TimerMode::Focus, true) => format!("Then a {} min break", snapshot.break_minutes),
        (TimerMode::Break, true) => "Skip with 'studyfocus skip'".to_string(),
    };
    output.push(hint.dimmed().to_string());

    output.join("\n")
}

/// Format the result of completing a focus interval.
pub fn format_completion_pretty(outcome: &CompletionOutcome) -> String {
    let mut output = Vec::new();
    output.push(
        format!(
            "✅ Focus interval #{} completed!",
            outcome.completed_focus_count
        )
        .green()
        .to_string(),
    );

    let kind = outcome.break_kind.display_name().to_lowercase();
    if outcome.break_started {
        output.push(format!("   {} min {kind} started", outcome.break_minutes));
    } else {
        output.push(format!("   {} min {kind} earned", outcome.break_minutes));
        output.push(String::new());
        output.push("   Take it with 'studyfocus break'".dimmed().to_string());
    }

    output.join("\n")
}

/// Format a page of session records as a table.
pub fn format_history_pretty(records: &[FocusRecord]) -> String {
    if records.is_empty() {
        return "Focus History (0 sessions)\n  No sessions".to_string();
    }

    let mut output = format!("Focus History ({} sessions)\n", records.len());
    output.push_str(&"─".repeat(50));
    output.push('\n');

    for record in records {
        let status_icon = if record.completed {
            "[x]".green()
        } else {
            "[-]".red()
        };

        output.push_str(&format!(
            "{} {}  {}  {}\n",
            status_icon,
            format!("#{}", record.id).dimmed(),
            record.created_at_local().format("%Y-%m-%d %H:%M"),
            format_minutes(u64::from(record.duration_minutes)).bold()
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::BreakKind;
    use chrono::{TimeZone, Utc};

    fn snapshot(mode: TimerMode, running: bool) -> TimerSnapshot {
        TimerSnapshot {
            mode,
            running,
            paused: mode != TimerMode::Idle && !running,
            remaining_seconds: 754,
            total_seconds: 1500,
            progress: 0.5,
            session_id: (mode == TimerMode::Focus).then_some(3),
            completed_focus_count: 1,
            focus_duration_minutes: 25,
            break_duration_minutes: 5,
            break_minutes: 5,
            long_break: false,
        }
    }

    #[test]
    fn test_snapshot_focus_running() {
        let text = format_snapshot_pretty(&snapshot(TimerMode::Focus, true));

        assert!(text.contains("Focus"));
        assert!(text.contains("12:34"));
        assert!(text.contains("Session:   #3"));
        assert!(text.contains("Completed: 1 focus interval"));
        assert!(text.contains("50%"));
    }

    #[test]
    fn test_snapshot_paused() {
        let text = format_snapshot_pretty(&snapshot(TimerMode::Break, false));

        assert!(text.contains("(paused)"));
        assert!(text.contains("studyfocus resume"));
    }

    #[test]
    fn test_snapshot_label_long_break() {
        let mut snap = snapshot(TimerMode::Break, true);
        snap.long_break = true;

        assert_eq!(snapshot_label(&snap), "Long Break");
        assert_eq!(snapshot_label(&snapshot(TimerMode::Idle, false)), "Ready");
    }

    #[test]
    fn test_completion_messages() {
        let outcome = CompletionOutcome {
            completed_focus_count: 4,
            break_minutes: 15,
            break_kind: BreakKind::Long,
            break_started: true,
        };
        let text = format_completion_pretty(&outcome);
        assert!(text.contains("#4"));
        assert!(text.contains("15 min long break started"));

        let idle = CompletionOutcome {
            break_started: false,
            ..outcome
        };
        assert!(format_completion_pretty(&idle).contains("studyfocus break"));
    }

    #[test]
    fn test_history_pretty() {
        assert!(format_history_pretty(&[]).contains("No sessions"));

        let records = vec![FocusRecord {
            id: 12,
            duration_minutes: 25,
            completed: true,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        }];
        let text = format_history_pretty(&records);
        assert!(text.contains("(1 sessions)"));
        assert!(text.contains("#12"));
        assert!(text.contains("25 minutes"));
    }
}
