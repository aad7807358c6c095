//! studyfocus - A Pomodoro focus timer for the terminal
//!
//! The timer's remaining time is derived from the moment it was last
//! started, and the timer is saved after every change, so a countdown
//! carries on across process restarts. Focus intervals are logged to a
//! local SQLite database.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod controller;
pub mod core;
pub mod error;
pub mod logging;
pub mod output;
pub mod sessions;
pub mod storage;
pub mod timer;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use controller::PomodoroController;
pub use error::StudyError;
pub use timer::CountdownStore;
