//! Habit Coach SQL storage
//!
//! Local SQLite persistence for journal entries.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-exports
pub use coach_core;

pub mod sqlite;

pub use sqlite::SqliteJournalStore;
