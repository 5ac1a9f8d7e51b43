//! Text feature extraction
//!
//! Turns a sentiment classification into the numbers fusion needs:
//! - valence: polarity + confidence folded onto a single [0, 1] positivity axis
//! - motivation score: a bounded bonus for goal/activity language
//! - keywords: vocabulary terms found in the text, for personalised feedback

use crate::types::{SentimentLabel, SentimentResult, TextSignal};
use once_cell::sync::Lazy;
use regex::Regex;

/// Activity/goal words that signal intent to act
pub const MOTIVATION_KEYWORDS: [&str; 11] = [
    "goal", "plan", "exercise", "workout", "study", "read", "practice", "build", "apply", "learn",
    "finish",
];

/// Score added per matched keyword
const KEYWORD_BONUS: f64 = 0.2;

/// Score added for positive sentiment
const POSITIVE_BONUS: f64 = 0.3;

static KEYWORD_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    MOTIVATION_KEYWORDS
        .iter()
        .filter_map(|kw| {
            Regex::new(&format!(r"(?i)\b{}\b", regex::escape(kw)))
                .ok()
                .map(|re| (*kw, re))
        })
        .collect()
});

/// Map a polarity + confidence onto [0, 1] positivity
pub fn valence(sentiment: &SentimentResult) -> f64 {
    match sentiment.label {
        SentimentLabel::Positive => sentiment.confidence,
        SentimentLabel::Negative => 1.0 - sentiment.confidence,
    }
}

/// Vocabulary terms present in `text` as whole words, in vocabulary order
pub fn find_keywords(text: &str) -> Vec<String> {
    KEYWORD_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(kw, _)| (*kw).to_string())
        .collect()
}

/// Bounded motivation heuristic
pub fn motivation_score(keyword_count: usize, label: SentimentLabel) -> f64 {
    let bonus = if label.is_positive() { POSITIVE_BONUS } else { 0.0 };
    (KEYWORD_BONUS * keyword_count as f64 + bonus).min(1.0)
}

/// Derive the full text signal for one journal text
pub fn extract_text_signal(text: &str, sentiment: &SentimentResult) -> TextSignal {
    let keywords = find_keywords(text);
    let motivation = motivation_score(keywords.len(), sentiment.label);

    TextSignal {
        label: sentiment.label,
        confidence: sentiment.confidence,
        valence: valence(sentiment),
        motivation_score: motivation,
        keywords,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positive(confidence: f64) -> SentimentResult {
        SentimentResult::new(SentimentLabel::Positive, confidence)
    }

    fn negative(confidence: f64) -> SentimentResult {
        SentimentResult::new(SentimentLabel::Negative, confidence)
    }

    #[test]
    fn test_valence() {
        assert!((valence(&positive(0.9)) - 0.9).abs() < 1e-12);
        assert!((valence(&negative(0.9)) - 0.1).abs() < 1e-12);
        assert!((valence(&negative(0.5)) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_keywords_follow_vocabulary_order() {
        let found = find_keywords("I want to study and then exercise, that is the goal");
        assert_eq!(found, vec!["goal", "exercise", "study"]);
    }

    #[test]
    fn test_keywords_whole_word_and_case_insensitive() {
        assert_eq!(find_keywords("READ a book"), vec!["read"]);
        assert!(find_keywords("I was reading and planning").is_empty());
        assert!(find_keywords("").is_empty());
    }

    #[test]
    fn test_keywords_reported_once() {
        assert_eq!(find_keywords("plan, plan, plan"), vec!["plan"]);
    }

    #[test]
    fn test_motivation_score() {
        assert!((motivation_score(0, SentimentLabel::Negative) - 0.0).abs() < 1e-12);
        assert!((motivation_score(0, SentimentLabel::Positive) - 0.3).abs() < 1e-12);
        assert!((motivation_score(2, SentimentLabel::Negative) - 0.4).abs() < 1e-12);
        assert_eq!(motivation_score(5, SentimentLabel::Positive), 1.0);
    }

    #[test]
    fn test_extract_text_signal() {
        let signal = extract_text_signal("Finished my workout, next goal: learn Rust", &positive(0.95));

        assert_eq!(signal.label, SentimentLabel::Positive);
        assert_eq!(signal.keywords, vec!["goal", "workout", "learn"]);
        assert!((signal.valence - 0.95).abs() < 1e-12);
        assert!((signal.motivation_score - 0.9).abs() < 1e-12);
        assert_eq!(signal.first_keyword(), Some("goal"));
    }
}
