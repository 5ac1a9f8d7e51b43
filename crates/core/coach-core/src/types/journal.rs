//! Journal entry types

use super::{FaceSignal, FusionResult, MoodCategory, TextSignal};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supportive message plus a transparent explanation of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Message shown to the user
    pub message: String,
    /// Deterministic summary of why the message was chosen
    pub rationale: String,
}

/// A journal record ready to be appended.
///
/// The store assigns `id` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJournalEntry {
    /// The text the user wrote
    pub raw_text: String,
    /// Sentiment-derived signal for the text
    pub text_signal: TextSignal,
    /// Face signal, when an image was analysed
    pub face_signal: Option<FaceSignal>,
    /// Fused mood score
    pub mood_score: f64,
    /// Generated feedback message
    pub feedback_message: String,
}

impl NewJournalEntry {
    /// Build a record from the outputs of one submission
    pub fn from_submission(
        raw_text: impl Into<String>,
        feedback: &Feedback,
        fusion: &FusionResult,
        text_signal: &TextSignal,
        face_signal: Option<&FaceSignal>,
    ) -> Self {
        Self {
            raw_text: raw_text.into(),
            text_signal: text_signal.clone(),
            face_signal: face_signal.cloned(),
            mood_score: fusion.mood_score,
            feedback_message: feedback.message.clone(),
        }
    }
}

/// A persisted journal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Auto-incrementing identity
    pub id: i64,
    /// When the store accepted the record
    pub timestamp: DateTime<Utc>,
    /// The text the user wrote
    pub raw_text: String,
    /// Sentiment-derived signal for the text
    pub text_signal: TextSignal,
    /// Face signal, when an image was analysed
    pub face_signal: Option<FaceSignal>,
    /// Fused mood score
    pub mood_score: f64,
    /// Generated feedback message
    pub feedback_message: String,
}

impl JournalEntry {
    /// Attach store-assigned identity to a new entry
    pub fn from_new(id: i64, timestamp: DateTime<Utc>, entry: NewJournalEntry) -> Self {
        Self {
            id,
            timestamp,
            raw_text: entry.raw_text,
            text_signal: entry.text_signal,
            face_signal: entry.face_signal,
            mood_score: entry.mood_score,
            feedback_message: entry.feedback_message,
        }
    }

    /// Category of the stored mood score
    pub fn category(&self) -> MoodCategory {
        MoodCategory::from_score(self.mood_score)
    }
}
