//! Offline lexicon sentiment
//!
//! Counts positive and negative journal words. An intensifier right before a
//! word boosts it; a negation up to two words before flips it.

use async_trait::async_trait;
use coach_core::{Result, SentimentClassifier, SentimentLabel, SentimentResult};

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "happy", "glad", "proud", "calm", "relaxed", "rested", "excited",
    "energized", "motivated", "productive", "grateful", "thankful", "love", "loved", "enjoy",
    "enjoyed", "fun", "nice", "awesome", "amazing", "wonderful", "fantastic", "excellent",
    "better", "best", "confident", "hopeful", "accomplished", "progress", "focused", "peaceful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "sad", "tired", "exhausted", "drained", "stressed", "anxious", "worried", "angry",
    "frustrated", "annoyed", "upset", "overwhelmed", "lonely", "bored", "stuck", "sick", "hate",
    "awful", "terrible", "horrible", "miserable", "depressed", "worse", "worst", "fail",
    "failed", "rough", "lazy", "hopeless", "guilty", "scared", "hurt",
];

const INTENSIFIERS: &[&str] = &["very", "really", "extremely", "so", "super", "absolutely", "totally"];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "don't", "didn't", "doesn't", "isn't", "wasn't", "can't", "couldn't",
    "won't", "dont", "didnt", "cant",
];

const INTENSIFIER_BOOST: f64 = 1.5;

/// Word-count sentiment classifier that needs no model server
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconSentimentClassifier;

impl LexiconSentimentClassifier {
    /// Create the classifier
    pub fn new() -> Self {
        Self
    }

    /// Score `text` synchronously
    pub fn score(&self, text: &str) -> SentimentResult {
        let lowered = text.to_lowercase();
        // Apostrophes stay inside tokens so "didn't" is one word
        let tokens: Vec<&str> = lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|t| !t.is_empty())
            .collect();

        let mut positive = 0.0;
        let mut negative = 0.0;

        for (i, token) in tokens.iter().enumerate() {
            let polarity = if POSITIVE_WORDS.contains(token) {
                1.0
            } else if NEGATIVE_WORDS.contains(token) {
                -1.0
            } else {
                continue;
            };

            let boosted = i > 0 && INTENSIFIERS.contains(&tokens[i - 1]);
            let weight = if boosted { INTENSIFIER_BOOST } else { 1.0 };

            let negated = tokens[i.saturating_sub(2)..i]
                .iter()
                .any(|t| NEGATIONS.contains(t));
            let polarity = if negated { -polarity } else { polarity };

            if polarity > 0.0 {
                positive += weight;
            } else {
                negative += weight;
            }
        }

        let evidence: f64 = positive + negative;
        if evidence == 0.0 {
            return SentimentResult::new(SentimentLabel::Positive, 0.5);
        }

        // More matched words means a more confident call
        let polarity = (positive - negative) / evidence;
        let strength = evidence / (evidence + 1.0);
        let confidence = 0.5 + 0.5 * polarity.abs() * strength;

        let label = if polarity >= 0.0 {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        };
        SentimentResult::new(label, confidence)
    }
}

#[async_trait]
impl SentimentClassifier for LexiconSentimentClassifier {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    async fn classify(&self, text: &str) -> Result<SentimentResult> {
        Ok(self.score(text))
    }
}
