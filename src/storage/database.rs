//! `SQLite` database connection.
//!
//! The database lives at `~/.studyfocus/studyfocus.db` and holds the focus
//! session log.

use std::path::Path;

use rusqlite::Connection;

use crate::error::StudyError;

use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, StudyError> {
        let conn = Connection::open(path).map_err(|e| {
            StudyError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        tracing::debug!(path = %path.display(), "opened session database");
        Self::init(conn)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, StudyError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            StudyError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StudyError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| StudyError::Database(format!("Failed to enable foreign keys: {e}")))?;

        let db = Self { conn };
        migrations::run(&db.conn)?;
        Ok(db)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, StudyError> {
        migrations::get_version(&self.conn)
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}
