//! Durable storage for the timer record.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::StudyError;

use super::state::TimerState;

/// Somewhere a [`TimerState`] survives between runs.
pub trait StatePersistence {
    /// Load the saved state, or `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the saved state cannot be read or is invalid.
    fn load(&self) -> Result<Option<TimerState>, StudyError>;

    /// Replace the saved state.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be written.
    fn save(&self, state: &TimerState) -> Result<(), StudyError>;
}

/// A JSON file, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct JsonStateFile {
    path: PathBuf,
}

impl JsonStateFile {
    /// Use the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatePersistence for JsonStateFile {
    fn load(&self) -> Result<Option<TimerState>, StudyError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)?;
        let state = serde_json::from_str(&contents).map_err(|e| {
            StudyError::Parse(format!(
                "Invalid timer state in {}: {e}",
                self.path.display()
            ))
        })?;
        Ok(Some(state))
    }

    fn save(&self, state: &TimerState) -> Result<(), StudyError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Serialized state held in memory.
///
/// Clones share the same slot, which lets a test hand one clone to a store,
/// drop the store, and open a second store on the same saved record.
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryState {
    /// The raw JSON last saved, if any.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// Overwrite the raw JSON.
    pub fn set_raw(&self, json: impl Into<String>) {
        *self.slot.borrow_mut() = Some(json.into());
    }
}

impl StatePersistence for MemoryState {
    fn load(&self) -> Result<Option<TimerState>, StudyError> {
        match self.slot.borrow().as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &TimerState) -> Result<(), StudyError> {
        *self.slot.borrow_mut() = Some(serde_json::to_string(state)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let file = JsonStateFile::new(temp_dir.path().join("timer.json"));

        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_file_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = JsonStateFile::new(temp_dir.path().join("nested").join("timer.json"));

        let state = TimerState::with_durations(45, 10);
        file.save(&state).unwrap();

        assert!(file.path().exists());
        assert!(!file.path().with_extension("json.tmp").exists());
        assert_eq!(file.load().unwrap(), Some(state));
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("timer.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonStateFile::new(path).load().unwrap_err();
        assert!(matches!(err, StudyError::Parse(_)));
    }

    #[test]
    fn test_memory_state_shared_between_clones() {
        let memory = MemoryState::default();
        let other = memory.clone();

        memory.save(&TimerState::with_durations(30, 5)).unwrap();

        let loaded = other.load().unwrap().unwrap();
        assert_eq!(loaded.focus_duration_minutes(), 30);
        assert!(other.raw().unwrap().contains("\"focus_duration_minutes\":30"));
    }
}
