//! Journal history table

use crate::percent;
use chrono::Local;
use coach_core::JournalEntry;
use std::fmt::Write;

const EXCERPT_CHARS: usize = 48;

/// Render up to `limit` entries as a table, in the order given
pub fn render_history(entries: &[JournalEntry], limit: usize) -> String {
    if entries.is_empty() {
        return "No entries yet. Write your first journal entry!\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:<16}  {:>6}  {:<8}  Entry", "Time", "Mood", "Category");

    for entry in entries.iter().take(limit) {
        let _ = writeln!(
            out,
            "{:<16}  {:>6}  {:<8}  {}",
            entry
                .timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M"),
            percent(entry.mood_score),
            entry.category().as_str(),
            excerpt(&entry.raw_text)
        );
    }

    if entries.len() > limit {
        let _ = writeln!(out, "... {} older entries", entries.len() - limit);
    }

    out
}

/// First line-free characters of the entry text
fn excerpt(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= EXCERPT_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(EXCERPT_CHARS - 3).collect();
        format!("{}...", cut.trim_end())
    }
}
