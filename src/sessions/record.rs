//! Focus session records.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// A logged focus interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusRecord {
    /// Record ID.
    pub id: i64,
    /// Planned length in minutes.
    pub duration_minutes: u32,
    /// Whether the interval ran to the end.
    pub completed: bool,
    /// When the record was created (the interval's start).
    pub created_at: DateTime<Utc>,
}

impl FocusRecord {
    /// Creation time in the local timezone.
    #[must_use]
    pub fn created_at_local(&self) -> DateTime<Local> {
        self.created_at.with_timezone(&Local)
    }
}

/// Fields of a record about to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFocusRecord {
    /// Planned length in minutes.
    pub duration_minutes: u32,
    /// Initial completion flag (normally false).
    pub completed: bool,
}

impl NewFocusRecord {
    /// A not-yet-completed interval of `duration_minutes`.
    #[must_use]
    pub const fn pending(duration_minutes: u32) -> Self {
        Self {
            duration_minutes,
            completed: false,
        }
    }
}

/// Partial update. Only `Some` fields are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusRecordPatch {
    /// New completion flag.
    pub completed: Option<bool>,
    /// New planned length.
    pub duration_minutes: Option<u32>,
}

impl FocusRecordPatch {
    /// Patch that only sets the completion flag.
    #[must_use]
    pub const fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            duration_minutes: None,
        }
    }

    /// Apply to a record in place.
    pub fn apply(&self, record: &mut FocusRecord) {
        if let Some(completed) = self.completed {
            record.completed = completed;
        }
        if let Some(minutes) = self.duration_minutes {
            record.duration_minutes = minutes;
        }
    }
}
