//! Integration tests for the SQLite journal store with real database operations

use coach_core::*;
use coach_storage_sql::SqliteJournalStore;

fn entry(text: &str, mood_score: f64, face: Option<FaceSignal>) -> NewJournalEntry {
    NewJournalEntry {
        raw_text: text.to_string(),
        text_signal: TextSignal {
            label: SentimentLabel::Positive,
            confidence: 0.875,
            valence: 0.875,
            motivation_score: 0.6,
            keywords: vec!["plan".to_string(), "study".to_string()],
        },
        face_signal: face,
        mood_score,
        feedback_message: format!("Keep going: {}", text),
    }
}

#[tokio::test]
async fn test_empty_journal_lists_nothing() {
    let store = SqliteJournalStore::new(":memory:").await.unwrap();
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_append_and_list_round_trip() {
    let store = SqliteJournalStore::new(":memory:").await.unwrap();

    let mut saved = Vec::new();
    for (i, text) in ["morning", "afternoon", "evening"].iter().enumerate() {
        let face = FaceSignal::new("happy", 0.5 + i as f64 * 0.125);
        saved.push(
            store
                .append(entry(text, 0.25 * (i + 1) as f64, Some(face)))
                .await
                .unwrap(),
        );
    }

    let listed = store.list_all().await.unwrap();
    assert_eq!(listed.len(), 3);

    // Newest first
    assert!(listed
        .windows(2)
        .all(|pair| pair[0].timestamp >= pair[1].timestamp));
    assert_eq!(listed[0].raw_text, "evening");

    for original in &saved {
        let found = listed.iter().find(|e| e.id == original.id).unwrap();
        assert_eq!(found, original);
    }
}

#[tokio::test]
async fn test_ids_increase_with_each_append() {
    let store = SqliteJournalStore::new(":memory:").await.unwrap();

    let first = store.append(entry("one", 0.5, None)).await.unwrap();
    let second = store.append(entry("two", 0.5, None)).await.unwrap();
    assert!(second.id > first.id);
    assert!(second.timestamp >= first.timestamp);
}

#[tokio::test]
async fn test_entry_without_face_reads_back_as_none() {
    let store = SqliteJournalStore::new(":memory:").await.unwrap();

    let saved = store.append(entry("text only", 0.4, None)).await.unwrap();
    let listed = store.list_all().await.unwrap();

    assert_eq!(listed.len(), 1);
    assert!(listed[0].face_signal.is_none());
    assert_eq!(listed[0], saved);
    assert_eq!(listed[0].category(), MoodCategory::Medium);
}

#[tokio::test]
async fn test_no_face_sentinel_is_preserved() {
    let store = SqliteJournalStore::new(":memory:").await.unwrap();

    store
        .append(entry("blurry selfie", 0.3, Some(FaceSignal::no_face())))
        .await
        .unwrap();

    let listed = store.list_all().await.unwrap();
    let face = listed[0].face_signal.as_ref().unwrap();
    assert!(face.dominant_emotion.is_no_face());
    assert_eq!(face.confidence, 0.0);
}

#[tokio::test]
async fn test_entries_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("entries.db");
    let url = format!("sqlite:{}", path.display());

    let saved = {
        let store = SqliteJournalStore::new(&url).await.unwrap();
        let saved = store.append(entry("remember me", 0.8, None)).await.unwrap();
        store.close().await;
        saved
    };

    assert!(path.exists(), "Database file should be created with its directory");

    let reopened = SqliteJournalStore::new(&url).await.unwrap();
    let listed = reopened.list_all().await.unwrap();
    assert_eq!(listed, vec![saved]);
    reopened.close().await;
}
