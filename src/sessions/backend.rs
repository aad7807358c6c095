//! The seam between the timer controller and wherever focus sessions are
//! recorded.

use crate::error::StudyError;

use super::record::{FocusRecord, FocusRecordPatch, NewFocusRecord};

/// Create/read/update/delete access to focus session records.
#[cfg_attr(test, mockall::automock)]
pub trait SessionBackend {
    /// Create a record stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn create(&self, draft: NewFocusRecord) -> Result<FocusRecord, StudyError>;

    /// Fetch one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails.
    fn get(&self, id: i64) -> Result<Option<FocusRecord>, StudyError>;

    /// Apply a partial update and return the updated record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this id.
    fn update(&self, id: i64, patch: FocusRecordPatch) -> Result<FocusRecord, StudyError>;

    /// Records newest first, skipping `skip` and returning at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list(&self, skip: usize, limit: usize) -> Result<Vec<FocusRecord>, StudyError>;

    /// Remove a record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this id.
    fn delete(&self, id: i64) -> Result<(), StudyError>;
}
