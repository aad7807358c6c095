//! Duration settings command.

use colored::Colorize;
use serde::Serialize;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::controller::PomodoroController;
use crate::core::{parse_duration_minutes, Clock};
use crate::error::StudyError;
use crate::output::to_json;
use crate::sessions::SessionBackend;
use crate::timer::StatePersistence;

/// Durations currently in effect.
#[derive(Debug, Serialize)]
struct DurationSettings {
    focus_minutes: u32,
    break_minutes: u32,
    long_break_minutes: u32,
    long_break_interval: u32,
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if a duration cannot be parsed, is out of range, or the
/// timer is not idle.
pub fn config<B: SessionBackend, C: Clock, P: StatePersistence>(
    controller: &mut PomodoroController<B, C, P>,
    cmd: ConfigCommands,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match cmd {
        ConfigCommands::Show => {}
        ConfigCommands::Focus { duration } => {
            controller.configure_focus_duration(parse_minutes(&duration)?)?;
        }
        ConfigCommands::Break { duration } => {
            controller.configure_break_duration(parse_minutes(&duration)?)?;
        }
    }

    let state = controller.store().state();
    let policy = controller.policy();
    let settings = DurationSettings {
        focus_minutes: state.focus_duration_minutes(),
        break_minutes: state.break_duration_minutes(),
        long_break_minutes: policy.long_break_minutes,
        long_break_interval: policy.long_break_interval,
    };

    match format {
        OutputFormat::Json => to_json(&settings),
        OutputFormat::Pretty => Ok([
            "⚙️  Timer Settings".bold().to_string(),
            "─".repeat(40),
            format!("Focus:      {} min", settings.focus_minutes),
            format!("Break:      {} min", settings.break_minutes),
            format!(
                "Long break: {} min every {} focus intervals",
                settings.long_break_minutes, settings.long_break_interval
            ),
        ]
        .join("\n")),
    }
}

fn parse_minutes(input: &str) -> Result<u32, StudyError> {
    parse_duration_minutes(input)
        .ok_or_else(|| StudyError::Parse(format!("Invalid duration '{input}'")))
}
