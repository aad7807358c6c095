//! Storage layer for studyfocus.
//!
//! `SQLite` persistence for the focus session log.

mod database;
mod migrations;

pub use database::Database;
