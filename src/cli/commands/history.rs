//! Session log commands.

use serde_json::json;

use crate::cli::args::OutputFormat;
use crate::controller::PomodoroController;
use crate::core::Clock;
use crate::error::StudyError;
use crate::output::{format_history, to_json};
use crate::sessions::{FocusReport, SessionBackend};
use crate::timer::StatePersistence;

/// List logged sessions, newest first.
///
/// # Errors
///
/// Returns an error if the session log cannot be read.
pub fn history<B: SessionBackend, C: Clock, P: StatePersistence>(
    controller: &PomodoroController<B, C, P>,
    limit: usize,
    skip: usize,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let records = controller.backend().list(skip, limit)?;
    format_history(&records, skip, format)
}

/// Delete one logged session.
///
/// # Errors
///
/// Returns `NotFound` if there is no such session.
pub fn delete<B: SessionBackend, C: Clock, P: StatePersistence>(
    controller: &mut PomodoroController<B, C, P>,
    id: i64,
    format: OutputFormat,
) -> Result<String, StudyError> {
    controller.backend().delete(id)?;
    // The active interval may have just lost its record.
    controller.restore();

    match format {
        OutputFormat::Json => to_json(&json!({ "deleted": id })),
        OutputFormat::Pretty => Ok(format!("🗑️  Deleted session #{id}")),
    }
}

/// Summarize completed sessions.
///
/// # Errors
///
/// Returns an error if the session log cannot be read.
pub fn report<B: SessionBackend, C: Clock, P: StatePersistence>(
    controller: &PomodoroController<B, C, P>,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let records = controller.backend().list(0, usize::MAX)?;
    let report = FocusReport::generate_today(&records);

    match format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Pretty => Ok(report.format()),
    }
}
