//! JSON output formatting for studyfocus.

use serde::Serialize;
use serde_json::json;

use crate::error::StudyError;
use crate::sessions::FocusRecord;

/// Format a page of session records as JSON.
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn format_history_json(records: &[FocusRecord], skip: usize) -> Result<String, StudyError> {
    let output = json!({
        "skip": skip,
        "count": records.len(),
        "items": records
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `StudyError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, StudyError> {
    Ok(serde_json::to_string_pretty(value)?)
}
