//! Path resolution for studyfocus configuration and data files.
//!
//! All studyfocus data is stored in `~/.studyfocus/` unless
//! `STUDYFOCUS_HOME` (or `--home`) points elsewhere:
//! - `config.yaml` - Main configuration file
//! - `studyfocus.db` - SQLite database holding the focus session log
//! - `timer.json` - The running timer, saved after every change

use std::path::PathBuf;

use crate::error::StudyError;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "STUDYFOCUS_HOME";

/// Paths to studyfocus configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.studyfocus/`
    pub root: PathBuf,
    /// Config file: `~/.studyfocus/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.studyfocus/studyfocus.db`
    pub database: PathBuf,
    /// Timer state file: `~/.studyfocus/timer.json`
    pub timer_state: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, StudyError> {
        if let Ok(root) = std::env::var(HOME_ENV) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            StudyError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".studyfocus")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("studyfocus.db"),
            timer_state: root.join("timer.json"),
            root,
        }
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), StudyError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                StudyError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}
