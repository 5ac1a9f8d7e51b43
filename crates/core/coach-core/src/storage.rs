//! Journal persistence interface

use crate::types::{JournalEntry, NewJournalEntry};
use crate::Result;
use async_trait::async_trait;

/// Append-only journal log
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JournalStore: Send + Sync {
    /// Persist one entry; the store assigns id and timestamp
    async fn append(&self, entry: NewJournalEntry) -> Result<JournalEntry>;

    /// All entries, most recent first
    async fn list_all(&self) -> Result<Vec<JournalEntry>>;
}
