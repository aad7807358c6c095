//! Timer command implementations.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::OutputFormat;
use crate::controller::{PomodoroController, TickEvent};
use crate::core::{format_minutes, format_mmss, Clock};
use crate::error::StudyError;
use crate::output::{format_completion, format_completion_pretty, format_snapshot, to_json};
use crate::sessions::SessionBackend;
use crate::timer::{StatePersistence, TimerMode};

/// Start a focus interval.
///
/// # Errors
///
/// Returns an error if a countdown is already active or the session log
/// cannot be written.
pub fn start<B: SessionBackend, C: Clock, P: StatePersistence>(
    controller: &mut PomodoroController<B, C, P>,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let record = controller.start_focus()?;

    match format {
        OutputFormat::Json => format_snapshot(&controller.snapshot(), format),
        OutputFormat::Pretty => {
            let output = [
                "🎯 Focus interval started!".green().to_string(),
                format!(
                    "   Duration: {}",
                    format_minutes(u64::from(record.duration_minutes))
                ),
                format!("   Session:  #{}", record.id),
                String::new(),
                "   Use 'studyfocus status' to check progress"
                    .dimmed()
                    .to_string(),
                "   Use 'studyfocus complete' when done".dimmed().to_string(),
            ];
            Ok(output.join("\n"))
        }
    }
}

/// Pause the running countdown.
///
/// # Errors
///
/// Returns an error if nothing is running.
pub fn pause<B: SessionBackend, C: Clock, P: StatePersistence>(
    controller: &mut PomodoroController<B, C, P>,
    format: OutputFormat,
) -> Result<String, StudyError> {
    controller.pause()?;
    let snapshot = controller.snapshot();

    match format {
        OutputFormat::Json => format_snapshot(&snapshot, format),
        OutputFormat::Pretty => Ok(format!(
            "⏸️  Paused with {} left",
            format_mmss(snapshot.remaining_seconds).bold()
        )),
    }
}

/// Resume a paused countdown.
///
/// # Errors
///
/// Returns an error if there is no paused countdown.
pub fn resume<B: SessionBackend, C: Clock, P: StatePersistence>(
    controller: &mut PomodoroController<B, C, P>,
    format: OutputFormat,
) -> Result<String, StudyError> {
    controller.resume()?;
    let snapshot = controller.snapshot();

    match format {
        OutputFormat::Json => format_snapshot(&snapshot, format),
        OutputFormat::Pretty => Ok(format!(
            "▶️  Resumed, {} left",
            format_mmss(snapshot.remaining_seconds).bold()
        )),
    }
}

/// Stop whatever is active.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn stop<B: SessionBackend, C: Clock, P: StatePersistence>(
    controller: &mut PomodoroController<B, C, P>,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let was = controller.snapshot().mode;
    controller.stop();

    match format {
        OutputFormat::Json => format_snapshot(&controller.snapshot(), format),
        OutputFormat::Pretty => Ok(match was {
            TimerMode::Idle => "Nothing to stop".dimmed().to_string(),
            TimerMode::Focus => "⏹️  Focus interval stopped (not counted)".to_string(),
            TimerMode::Break => "⏹️  Break stopped".to_string(),
        }),
    }
}

/// Complete the current focus interval.
///
/// # Errors
///
/// Returns an error outside focus mode or if the session log update fails.
pub fn complete<B: SessionBackend, C: Clock, P: StatePersistence>(
    controller: &mut PomodoroController<B, C, P>,
    no_break: bool,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let outcome = controller.complete_focus(!no_break)?;
    format_completion(&outcome, format)
}

/// Start the earned break.
///
/// # Errors
///
/// Returns an error during focus or while a countdown runs.
pub fn start_break<B: SessionBackend, C: Clock, P: StatePersistence>(
    controller: &mut PomodoroController<B, C, P>,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let minutes = controller.start_break()?;
    let snapshot = controller.snapshot();

    match format {
        OutputFormat::Json => format_snapshot(&snapshot, format),
        OutputFormat::Pretty => {
            let kind = if snapshot.long_break {
                "long break"
            } else {
                "break"
            };
            Ok(format!("☕ {minutes} min {kind} started").cyan().to_string())
        }
    }
}

/// Skip the current break.
///
/// # Errors
///
/// Returns an error during focus.
pub fn skip<B: SessionBackend, C: Clock, P: StatePersistence>(
    controller: &mut PomodoroController<B, C, P>,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let was = controller.snapshot().mode;
    controller.skip_break()?;

    match format {
        OutputFormat::Json => format_snapshot(&controller.snapshot(), format),
        OutputFormat::Pretty => Ok(if was == TimerMode::Break {
            "⏭️  Break skipped".to_string()
        } else {
            "No break to skip".dimmed().to_string()
        }),
    }
}

/// Refresh once and show the timer.
///
/// # Errors
///
/// Returns an error if finishing an expired focus interval fails.
pub fn status<B: SessionBackend, C: Clock, P: StatePersistence>(
    controller: &mut PomodoroController<B, C, P>,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let event = controller.tick()?;
    let snapshot = controller.snapshot();

    match format {
        OutputFormat::Json => to_json(&json!({
            "event": event,
            "timer": snapshot,
        })),
        OutputFormat::Pretty => {
            let mut output = Vec::new();
            match event {
                TickEvent::FocusCompleted(outcome) => {
                    output.push(format_completion_pretty(&outcome));
                    output.push(String::new());
                }
                TickEvent::BreakFinished => {
                    output.push("🔔 Break is over".yellow().to_string());
                    output.push(String::new());
                }
                TickEvent::Idle | TickEvent::Paused { .. } | TickEvent::Counting { .. } => {}
            }
            output.push(format_snapshot(&snapshot, format)?);
            Ok(output.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::testing::controller;

    #[test]
    fn test_start_and_status() {
        let (clock, mut controller) = controller();

        let text = start(&mut controller, OutputFormat::Pretty).unwrap();
        assert!(text.contains("Focus interval started"));
        assert!(text.contains("#1"));

        clock.advance_secs(60);
        let text = status(&mut controller, OutputFormat::Pretty).unwrap();
        assert!(text.contains("24:00"));
    }

    #[test]
    fn test_start_twice_fails() {
        let (_, mut controller) = controller();

        start(&mut controller, OutputFormat::Pretty).unwrap();
        let err = start(&mut controller, OutputFormat::Pretty).unwrap_err();

        assert_eq!(
            err.to_string(),
            "cannot start a focus interval while in focus (running)"
        );
    }

    #[test]
    fn test_pause_resume_json() {
        let (clock, mut controller) = controller();

        start(&mut controller, OutputFormat::Json).unwrap();
        clock.advance_secs(30);
        let json = pause(&mut controller, OutputFormat::Json).unwrap();
        assert!(json.contains("\"remaining_seconds\": 1470"));
        assert!(json.contains("\"paused\": true"));

        clock.advance_secs(600);
        let json = resume(&mut controller, OutputFormat::Json).unwrap();
        assert!(json.contains("\"remaining_seconds\": 1470"));
        assert!(json.contains("\"running\": true"));
    }

    #[test]
    fn test_status_completes_expired_focus() {
        let (clock, mut controller) = controller();

        start(&mut controller, OutputFormat::Pretty).unwrap();
        clock.advance_secs(2 * 60 * 60);

        let json = status(&mut controller, OutputFormat::Json).unwrap();

        assert!(json.contains("\"event\": \"focus_completed\""));
        assert!(json.contains("\"mode\": \"break\""));
        assert!(json.contains("\"completed_focus_count\": 1"));
    }

    #[test]
    fn test_complete_no_break_then_break() {
        let (_, mut controller) = controller();

        start(&mut controller, OutputFormat::Pretty).unwrap();
        let text = complete(&mut controller, true, OutputFormat::Pretty).unwrap();
        assert!(text.contains("earned"));

        let text = start_break(&mut controller, OutputFormat::Pretty).unwrap();
        assert!(text.contains("5 min break started"));

        let text = skip(&mut controller, OutputFormat::Pretty).unwrap();
        assert!(text.contains("Break skipped"));
    }

    #[test]
    fn test_stop_messages() {
        let (_, mut controller) = controller();

        let text = stop(&mut controller, OutputFormat::Pretty).unwrap();
        assert!(text.contains("Nothing to stop"));

        start(&mut controller, OutputFormat::Pretty).unwrap();
        let text = stop(&mut controller, OutputFormat::Pretty).unwrap();
        assert!(text.contains("not counted"));
    }

    #[test]
    fn test_skip_during_focus_fails() {
        let (_, mut controller) = controller();

        start(&mut controller, OutputFormat::Pretty).unwrap();

        assert!(skip(&mut controller, OutputFormat::Pretty).is_err());
    }
}
