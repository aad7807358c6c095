//! Error types for studyfocus.

use thiserror::Error;

use crate::timer::TimerError;

/// Errors surfaced by studyfocus operations.
#[derive(Debug, Error)]
pub enum StudyError {
    /// Configuration could not be read, written or resolved.
    #[error("configuration error: {0}")]
    Config(String),

    /// The session log database failed.
    #[error("database error: {0}")]
    Database(String),

    /// A filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized data could not be parsed or produced.
    #[error("parse error: {0}")]
    Parse(String),

    /// A requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The timer rejected an operation.
    #[error(transparent)]
    Timer(#[from] TimerError),
}

impl From<serde_json::Error> for StudyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<rusqlite::Error> for StudyError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{DurationKind, TimerMode};

    #[test]
    fn test_timer_error_is_transparent() {
        let err: StudyError = TimerError::OutOfRangeDuration {
            kind: DurationKind::Focus,
            value: 90,
            min: 1,
            max: 60,
        }
        .into();

        assert_eq!(
            err.to_string(),
            "focus duration 90 is outside the accepted range 1-60"
        );
    }

    #[test]
    fn test_invalid_transition_message() {
        let err: StudyError = TimerError::InvalidTransition {
            operation: "pause",
            mode: TimerMode::Idle,
            running: false,
        }
        .into();

        assert_eq!(err.to_string(), "cannot pause while idle");
    }

    #[test]
    fn test_json_error_maps_to_parse() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = StudyError::from(json_err);
        assert!(matches!(err, StudyError::Parse(_)));
    }
}
