//! Output formatting for studyfocus.
//!
//! This module renders timer snapshots and the session log in either
//! output format.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::controller::{CompletionOutcome, TimerSnapshot};
use crate::error::StudyError;
use crate::sessions::FocusRecord;

pub use json::*;
pub use pretty::*;

/// Format the timer based on output format
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_snapshot(snapshot: &TimerSnapshot, format: OutputFormat) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_snapshot_pretty(snapshot)),
        OutputFormat::Json => to_json(snapshot),
    }
}

/// Format a completion based on output format
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_completion(
    outcome: &CompletionOutcome,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_completion_pretty(outcome)),
        OutputFormat::Json => to_json(outcome),
    }
}

/// Format session records based on output format
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_history(
    records: &[FocusRecord],
    skip: usize,
    format: OutputFormat,
) -> Result<String, StudyError> {
    match format {
        OutputFormat::Pretty => Ok(format_history_pretty(records)),
        OutputFormat::Json => format_history_json(records, skip),
    }
}
