//! ASCII mood trend chart
//!
//! One column per entry, oldest on the left. The category thresholds are
//! dashed lines drawn between rows; a point is always placed on the side of
//! a threshold that matches its category.

use coach_core::{JournalEntry, HIGH_THRESHOLD, LOW_THRESHOLD};
use std::fmt::Write;

/// Chart rows when no height is requested
pub const DEFAULT_TREND_HEIGHT: usize = 11;

const MIN_HEIGHT: usize = 3;

/// Most recent entries that fit on one line
const MAX_POINTS: usize = 60;

/// Chart the mood score of `entries` (newest first, as listed by the store)
pub fn render_trend(entries: &[JournalEntry], height: usize) -> String {
    if entries.is_empty() {
        return "No entries yet. Write your first journal entry!\n".to_string();
    }

    let height = height.max(MIN_HEIGHT);
    let points: Vec<f64> = entries
        .iter()
        .take(MAX_POINTS)
        .rev()
        .map(|e| e.mood_score)
        .collect();
    let rows: Vec<usize> = points.iter().map(|&s| row_for(s, height)).collect();

    let thresholds = [HIGH_THRESHOLD, LOW_THRESHOLD];
    let threshold_line = "-".repeat(points.len());

    let mut out = String::new();
    for row in 0..height {
        for threshold in thresholds {
            if boundary_for(threshold, height) == row {
                let _ = writeln!(out, "{:>4.2} +{}", threshold, threshold_line);
            }
        }

        let label = 1.0 - row as f64 / (height - 1) as f64;
        let line: String = rows
            .iter()
            .map(|&r| if r == row { '*' } else { ' ' })
            .collect();
        let _ = writeln!(out, "{:>4.2} |{}", label, line.trim_end());
    }

    let _ = writeln!(out, "     +{}", "-".repeat(points.len()));
    let _ = writeln!(out, "      oldest -> newest ({} entries)", points.len());
    out
}

/// Number of rows drawn above the line for `threshold`
fn boundary_for(threshold: f64, height: usize) -> usize {
    ((1.0 - threshold) * (height - 1) as f64).floor() as usize + 1
}

/// Row of `score` counting from the top (1.0) to the bottom (0.0)
fn row_for(score: f64, height: usize) -> usize {
    let score = if score.is_finite() { score.clamp(0.0, 1.0) } else { 0.5 };
    let mut row = ((1.0 - score) * (height - 1) as f64).round() as usize;

    for threshold in [HIGH_THRESHOLD, LOW_THRESHOLD] {
        let boundary = boundary_for(threshold, height);
        row = if score >= threshold {
            row.min(boundary - 1)
        } else {
            row.max(boundary)
        };
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use coach_core::{NewJournalEntry, SentimentLabel, TextSignal};

    /// Entries newest first, with scores given oldest first
    fn entries(scores: &[f64]) -> Vec<JournalEntry> {
        let start = Utc::now();
        let mut list: Vec<JournalEntry> = scores
            .iter()
            .enumerate()
            .map(|(i, &mood_score)| {
                JournalEntry::from_new(
                    i as i64 + 1,
                    start + Duration::minutes(i as i64),
                    NewJournalEntry {
                        raw_text: format!("entry {}", i),
                        text_signal: TextSignal {
                            label: SentimentLabel::Positive,
                            confidence: 0.5,
                            valence: 0.5,
                            motivation_score: 0.1,
                            keywords: vec![],
                        },
                        face_signal: None,
                        mood_score,
                        feedback_message: String::new(),
                    },
                )
            })
            .collect();
        list.reverse();
        list
    }

    #[test]
    fn test_empty_trend() {
        assert!(render_trend(&[], 10).contains("No entries yet"));
    }

    #[test]
    fn test_one_point_per_entry() {
        let out = render_trend(&entries(&[0.2, 0.5, 0.9, 0.75]), DEFAULT_TREND_HEIGHT);
        let lines: Vec<&str> = out.lines().collect();

        // Chart rows, two threshold lines, axis and caption
        assert_eq!(lines.len(), DEFAULT_TREND_HEIGHT + 4);
        assert_eq!(out.matches('*').count(), 4);
        assert!(out.contains("(4 entries)"));
    }

    #[test]
    fn test_oldest_entry_is_leftmost() {
        let out = render_trend(&entries(&[0.0, 1.0]), 5);
        let lines: Vec<&str> = out.lines().collect();

        // Top row holds the newer 1.0 in the second column
        assert_eq!(lines[0], "1.00 | *");
        // Bottom row holds the older 0.0 in the first column
        assert_eq!(lines[6], "0.00 |*");
    }

    #[test]
    fn test_threshold_lines_are_drawn() {
        let out = render_trend(&entries(&[0.5, 0.5, 0.5]), DEFAULT_TREND_HEIGHT);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), DEFAULT_TREND_HEIGHT + 4);
        assert!(lines.contains(&"0.70 +---"));
        assert!(lines.contains(&"0.35 +---"));
    }

    /// Stars above and below the line drawn for `threshold`
    fn stars_around(out: &str, threshold: &str) -> (usize, usize) {
        let lines: Vec<&str> = out.lines().collect();
        let at = lines
            .iter()
            .position(|l| l.starts_with(&format!("{} +", threshold)))
            .unwrap();
        let count = |ls: &[&str]| ls.iter().map(|l| l.matches('*').count()).sum::<usize>();
        (count(&lines[..at]), count(&lines[at + 1..]))
    }

    #[test]
    fn test_categories_fall_on_their_side_of_thresholds() {
        let out = render_trend(&entries(&[0.30, 0.35]), DEFAULT_TREND_HEIGHT);
        assert_eq!(stars_around(&out, "0.35"), (1, 1));

        let out = render_trend(&entries(&[0.69, 0.70]), DEFAULT_TREND_HEIGHT);
        assert_eq!(stars_around(&out, "0.70"), (1, 1));
    }

    #[test]
    fn test_row_for_respects_categories() {
        let low = row_for(0.30, 11);
        let medium = row_for(0.35, 11);
        assert!(low >= boundary_for(LOW_THRESHOLD, 11));
        assert!(medium < boundary_for(LOW_THRESHOLD, 11));
        assert!(row_for(0.70, 11) < boundary_for(HIGH_THRESHOLD, 11));
        assert!(row_for(0.6999, 11) >= boundary_for(HIGH_THRESHOLD, 11));
    }

    #[test]
    fn test_row_for_bounds() {
        assert_eq!(row_for(1.0, 11), 0);
        assert_eq!(row_for(0.0, 11), 10);
        assert_eq!(row_for(1.7, 11), 0);
        assert_eq!(row_for(f64::NAN, 11), 5);
    }
}
