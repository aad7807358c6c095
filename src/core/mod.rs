//! Core abstractions for studyfocus.
//!
//! This module provides the clock seam and duration helpers shared by the
//! timer, the CLI and the terminal display.

mod clock;
mod duration;

pub use clock::{Clock, ManualClock, SystemClock};
pub use duration::{
    format_minutes, format_mmss, parse_duration_minutes, parse_duration_secs,
    render_progress_bar,
};
