//! Focus session log.
//!
//! Every focus interval is bracketed by a record: created when the interval
//! starts, marked completed (or not) when it ends.

mod backend;
pub mod report;
mod record;
mod storage;

#[cfg(test)]
pub use backend::MockSessionBackend;
pub use backend::SessionBackend;
pub use record::{FocusRecord, FocusRecordPatch, NewFocusRecord};
pub use report::{DailyFocus, FocusReport};
pub use storage::SqliteSessions;
