//! Pomodoro countdown.
//!
//! Tracks one focus or break countdown across pause/resume and across
//! process restarts:
//! - `state`: the persisted record and its invariants
//! - `store`: the operations that mutate it
//! - `persist`: where the record lives between runs
//! - `policy`: which break follows a completed focus interval

mod error;
pub mod persist;
pub mod policy;
mod state;
mod store;

pub use error::{DurationKind, TimerError};
pub use persist::{JsonStateFile, MemoryState, StatePersistence};
pub use policy::{BreakKind, BreakPolicy};
pub use state::{
    TimerMode, TimerState, BREAK_MINUTES_RANGE, DEFAULT_BREAK_MINUTES, DEFAULT_FOCUS_MINUTES,
    FOCUS_MINUTES_RANGE,
};
pub use store::{CountdownStore, MAX_COUNTDOWN_SECS};
