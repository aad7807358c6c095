//! Focus session storage.
//!
//! Persists focus session records to the local database.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use super::backend::SessionBackend;
use super::record::{FocusRecord, FocusRecordPatch, NewFocusRecord};
use crate::error::StudyError;
use crate::storage::Database;

/// `SQLite`-backed session log.
pub struct SqliteSessions {
    db: Database,
}

impl SqliteSessions {
    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Insert a record with an explicit creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_at(
        &self,
        draft: NewFocusRecord,
        created_at: DateTime<Utc>,
    ) -> Result<FocusRecord, StudyError> {
        let conn = self.db.connection();

        conn.execute(
            r"INSERT INTO pomodoro_sessions (duration_minutes, completed, created_at)
              VALUES (?1, ?2, ?3)",
            params![
                draft.duration_minutes,
                draft.completed,
                created_at.to_rfc3339_opts(SecondsFormat::Micros, true)
            ],
        )
        .map_err(|e| StudyError::Database(format!("Failed to insert session: {e}")))?;

        let record = FocusRecord {
            id: conn.last_insert_rowid(),
            duration_minutes: draft.duration_minutes,
            completed: draft.completed,
            created_at,
        };
        tracing::debug!(id = record.id, minutes = record.duration_minutes, "session recorded");
        Ok(record)
    }

    /// Every record, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn all(&self) -> Result<Vec<FocusRecord>, StudyError> {
        self.list(0, usize::MAX)
    }
}

impl SessionBackend for SqliteSessions {
    fn create(&self, draft: NewFocusRecord) -> Result<FocusRecord, StudyError> {
        self.insert_at(draft, Utc::now())
    }

    fn get(&self, id: i64) -> Result<Option<FocusRecord>, StudyError> {
        let conn = self.db.connection();

        conn.query_row(
            r"SELECT id, duration_minutes, completed, created_at
              FROM pomodoro_sessions WHERE id = ?1",
            [id],
            row_to_record,
        )
        .optional()
        .map_err(|e| StudyError::Database(format!("Failed to query session: {e}")))
    }

    fn update(&self, id: i64, patch: FocusRecordPatch) -> Result<FocusRecord, StudyError> {
        let mut record = self
            .get(id)?
            .ok_or_else(|| StudyError::NotFound(format!("Session {id}")))?;
        patch.apply(&mut record);

        self.db
            .connection()
            .execute(
                r"UPDATE pomodoro_sessions SET duration_minutes = ?1, completed = ?2
                  WHERE id = ?3",
                params![record.duration_minutes, record.completed, id],
            )
            .map_err(|e| StudyError::Database(format!("Failed to update session: {e}")))?;

        tracing::debug!(id, completed = record.completed, "session updated");
        Ok(record)
    }

    fn list(&self, skip: usize, limit: usize) -> Result<Vec<FocusRecord>, StudyError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT id, duration_minutes, completed, created_at
                  FROM pomodoro_sessions
                  ORDER BY created_at DESC, id DESC
                  LIMIT ?1 OFFSET ?2",
            )
            .map_err(|e| StudyError::Database(format!("Failed to prepare query: {e}")))?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let skip = i64::try_from(skip).unwrap_or(i64::MAX);

        let rows = stmt
            .query_map([limit, skip], row_to_record)
            .map_err(|e| StudyError::Database(format!("Failed to query sessions: {e}")))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| StudyError::Database(e.to_string()))
    }

    fn delete(&self, id: i64) -> Result<(), StudyError> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM pomodoro_sessions WHERE id = ?1", [id])
            .map_err(|e| StudyError::Database(format!("Failed to delete session: {e}")))?;

        if rows == 0 {
            return Err(StudyError::NotFound(format!("Session {id}")));
        }
        tracing::debug!(id, "session deleted");
        Ok(())
    }
}

/// Convert a database row to a `FocusRecord`.
fn row_to_record(row: &Row<'_>) -> Result<FocusRecord, rusqlite::Error> {
    let created_at_str: String = row.get(3)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(FocusRecord {
        id: row.get(0)?,
        duration_minutes: row.get(1)?,
        completed: row.get(2)?,
        created_at,
    })
}
