//! Command implementations for studyfocus.
//!
//! Every command runs against a [`PomodoroController`] that has already been
//! restored, and returns the text to print.

mod completions;
mod history;
mod settings;
mod timer;

pub use completions::completions;
pub use history::{delete, history, report};
pub use settings::config;
pub use timer::{complete, pause, resume, skip, start, start_break, status, stop};

use crate::config::{Config, Paths};
use crate::controller::PomodoroController;
use crate::core::SystemClock;
use crate::error::StudyError;
use crate::sessions::SqliteSessions;
use crate::storage::Database;
use crate::timer::{CountdownStore, JsonStateFile};

/// The controller as the binary runs it.
pub type AppController = PomodoroController<SqliteSessions, SystemClock, JsonStateFile>;

/// Open the session log and the saved timer under `paths`.
///
/// # Errors
///
/// Returns an error if the data directory or the database cannot be opened.
pub fn open_controller(paths: &Paths, config: &Config) -> Result<AppController, StudyError> {
    paths.ensure_dirs()?;

    let sessions = SqliteSessions::with_database(Database::open_at(&paths.database)?);
    let store = CountdownStore::open(
        SystemClock,
        JsonStateFile::new(&paths.timer_state),
        config.timer.fresh_state(),
    );

    let mut controller = PomodoroController::new(store, sessions, config.timer.break_policy())
        .with_auto_start_break(config.timer.auto_start_break);
    controller.restore();
    Ok(controller)
}

#[cfg(test)]
pub(crate) mod testing {
    use chrono::{TimeZone, Utc};

    use crate::controller::PomodoroController;
    use crate::core::ManualClock;
    use crate::sessions::SqliteSessions;
    use crate::storage::Database;
    use crate::timer::{BreakPolicy, CountdownStore, MemoryState, TimerState};

    pub type TestController = PomodoroController<SqliteSessions, ManualClock, MemoryState>;

    /// Controller over an in-memory database, with a clock the test drives.
    pub fn controller() -> (ManualClock, TestController) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
        let sessions = SqliteSessions::with_database(Database::open_in_memory().unwrap());
        let store = CountdownStore::open(clock.clone(), MemoryState::default(), TimerState::default());
        (
            clock,
            PomodoroController::new(store, sessions, BreakPolicy::default()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::SessionBackend;
    use crate::timer::TimerMode;
    use tempfile::TempDir;

    #[test]
    fn test_open_controller_creates_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("home"));

        let controller = open_controller(&paths, &Config::default()).unwrap();

        assert!(paths.database.exists());
        assert_eq!(controller.snapshot().mode, TimerMode::Idle);
        assert_eq!(controller.snapshot().remaining_seconds, 1500);
    }

    #[test]
    fn test_open_controller_resumes_saved_timer() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().to_path_buf());

        {
            let mut controller = open_controller(&paths, &Config::default()).unwrap();
            controller.start_focus().unwrap();
        }

        let controller = open_controller(&paths, &Config::default()).unwrap();
        let snap = controller.snapshot();
        assert_eq!(snap.mode, TimerMode::Focus);
        assert!(snap.session_id.is_some());
    }

    #[test]
    fn test_open_controller_drops_deleted_session() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().to_path_buf());

        let id = {
            let mut controller = open_controller(&paths, &Config::default()).unwrap();
            let record = controller.start_focus().unwrap();
            controller.backend().delete(record.id).unwrap();
            record.id
        };
        assert!(id > 0);

        let controller = open_controller(&paths, &Config::default()).unwrap();
        assert_eq!(controller.snapshot().mode, TimerMode::Idle);
    }

    #[test]
    fn test_config_seeds_fresh_timer() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().to_path_buf());
        let mut config = Config::default();
        config.timer.focus_minutes = 50;

        let controller = open_controller(&paths, &config).unwrap();

        assert_eq!(controller.snapshot().remaining_seconds, 3000);
    }
}
