//! Database migrations for studyfocus.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;

use crate::error::StudyError;

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, StudyError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| StudyError::Database(format!("Failed to get schema version: {e}")))
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), StudyError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| StudyError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), StudyError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        tracing::debug!(version, "running migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), StudyError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(StudyError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: focus session log.
fn migrate_v1(conn: &Connection) -> Result<(), StudyError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS pomodoro_sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            duration_minutes INTEGER NOT NULL DEFAULT 25,
            completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_pomodoro_sessions_created
        ON pomodoro_sessions(created_at);
        ",
    )
    .map_err(|e| StudyError::Database(format!("Migration v1 failed: {e}")))
}
