//! SQLite journal store
//!
//! Keeps every journal entry in a single local `entries` table. Signals are
//! stored as JSON text; timestamps as microseconds since the Unix epoch so
//! they read back exactly as written.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use coach_core::{CoachError, JournalEntry, JournalStore, NewJournalEntry, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

/// SQLite-backed journal store
pub struct SqliteJournalStore {
    pool: SqlitePool,
}

impl SqliteJournalStore {
    /// Open (creating if needed) the database at `database_url` and ensure the schema.
    ///
    /// Accepts `sqlite:path/to/file.db`, a bare path, or `:memory:`.
    pub async fn new(database_url: &str) -> Result<Self> {
        info!("Opening SQLite journal at: {}", database_url);

        let in_memory = is_in_memory(database_url);
        let opts = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| CoachError::database(format!("Invalid SQLite URL: {}", e)))?
            .create_if_missing(true);

        if !in_memory {
            if let Some(parent) = opts.get_filename().parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        // Every connection to :memory: is its own database, so keep exactly one alive
        let pool_opts = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(4)
        };

        let pool = pool_opts
            .connect_with(opts)
            .await
            .map_err(CoachError::DatabaseSqlx)?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Initialize database schema
    async fn init_schema(&self) -> Result<()> {
        debug!("Initializing SQLite journal schema...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp INTEGER NOT NULL,
                text TEXT NOT NULL,
                text_emotion TEXT NOT NULL,
                face_emotion TEXT,
                mood_score REAL NOT NULL,
                feedback TEXT NOT NULL
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_entries_timestamp ON entries(timestamp)")
            .execute(&self.pool)
            .await?;

        debug!("SQLite journal schema ready");
        Ok(())
    }

    /// Close the connection pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl JournalStore for SqliteJournalStore {
    async fn append(&self, entry: NewJournalEntry) -> Result<JournalEntry> {
        let timestamp = now_micros()?;
        let text_emotion = serde_json::to_string(&entry.text_signal)?;
        let face_emotion = entry
            .face_signal
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let result = sqlx::query(
            "INSERT INTO entries (timestamp, text, text_emotion, face_emotion, mood_score, feedback)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(timestamp.timestamp_micros())
        .bind(&entry.raw_text)
        .bind(&text_emotion)
        .bind(&face_emotion)
        .bind(entry.mood_score)
        .bind(&entry.feedback_message)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, "Appended journal entry");

        Ok(JournalEntry::from_new(id, timestamp, entry))
    }

    async fn list_all(&self) -> Result<Vec<JournalEntry>> {
        let rows = sqlx::query(
            "SELECT id, timestamp, text, text_emotion, face_emotion, mood_score, feedback
             FROM entries
             ORDER BY timestamp DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_entry).collect()
    }
}

fn row_to_entry(row: &SqliteRow) -> Result<JournalEntry> {
    let micros: i64 = row.try_get("timestamp")?;
    let text_emotion: String = row.try_get("text_emotion")?;
    let face_emotion: Option<String> = row.try_get("face_emotion")?;

    Ok(JournalEntry {
        id: row.try_get("id")?,
        timestamp: DateTime::<Utc>::from_timestamp_micros(micros)
            .ok_or_else(|| CoachError::database(format!("Invalid timestamp: {}", micros)))?,
        raw_text: row.try_get("text")?,
        text_signal: serde_json::from_str(&text_emotion)?,
        face_signal: face_emotion
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?,
        mood_score: row.try_get("mood_score")?,
        feedback_message: row.try_get("feedback")?,
    })
}

/// Current time truncated to the precision stored on disk
fn now_micros() -> Result<DateTime<Utc>> {
    let micros = Utc::now().timestamp_micros();
    DateTime::<Utc>::from_timestamp_micros(micros)
        .ok_or_else(|| CoachError::database("System clock out of range"))
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_in_memory() {
        assert!(is_in_memory(":memory:"));
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://journal?mode=memory"));
        assert!(!is_in_memory("sqlite:data/entries.db"));
    }

    #[test]
    fn test_now_micros_has_no_sub_micro_precision() {
        let ts = now_micros().unwrap();
        assert_eq!(ts.timestamp_subsec_nanos() % 1_000, 0);
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let store = SqliteJournalStore::new(":memory:").await.unwrap();
        store.init_schema().await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
