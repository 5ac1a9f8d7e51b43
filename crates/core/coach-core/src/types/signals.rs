//! Classifier signals
//!
//! Structured outputs of the two pretrained classifiers and the text
//! features derived from them:
//! - `SentimentResult`: polarity label + confidence from the text model
//! - `TextSignal`: valence, motivation and keywords derived from a journal text
//! - `FaceSignal`: dominant facial emotion (or the no-face sentinel)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel label reported when no face could be found in an image
pub const NO_FACE_LABEL: &str = "no_face_detected";

/// Polarity reported by the sentiment classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    /// Positive polarity
    Positive,
    /// Negative polarity
    Negative,
}

impl SentimentLabel {
    /// Parse a label as emitted by common sentiment models.
    ///
    /// Accepts `POSITIVE`/`NEGATIVE` in any case and the generic
    /// `LABEL_1`/`LABEL_0` names binary classifiers fall back to.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "POSITIVE" | "POS" | "LABEL_1" => Some(SentimentLabel::Positive),
            "NEGATIVE" | "NEG" | "LABEL_0" => Some(SentimentLabel::Negative),
            _ => None,
        }
    }

    /// Canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
        }
    }

    /// Whether this is the positive label
    pub fn is_positive(&self) -> bool {
        matches!(self, SentimentLabel::Positive)
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw output of a sentiment classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Predicted polarity
    pub label: SentimentLabel,
    /// Confidence of the label (0.0 to 1.0)
    pub confidence: f64,
}

impl SentimentResult {
    /// Create a sentiment result, clamping confidence to [0, 1]
    pub fn new(label: SentimentLabel, confidence: f64) -> Self {
        Self {
            label,
            confidence: clamp_unit(confidence, 0.0),
        }
    }
}

/// The two numbers fusion needs from a text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextFeatures {
    /// Positivity of the text (0.0 to 1.0)
    pub valence: f64,
    /// Heuristic goal/activity language score (0.0 to 1.0)
    pub motivation_score: f64,
}

impl TextFeatures {
    /// Create text features
    pub fn new(valence: f64, motivation_score: f64) -> Self {
        Self {
            valence,
            motivation_score,
        }
    }
}

/// Everything derived from one submitted text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSignal {
    /// Polarity label from the classifier
    pub label: SentimentLabel,
    /// Classifier confidence
    pub confidence: f64,
    /// Normalized positivity (0.0 to 1.0)
    pub valence: f64,
    /// Goal/activity language score (0.0 to 1.0)
    pub motivation_score: f64,
    /// Matched vocabulary terms, in vocabulary order
    pub keywords: Vec<String>,
}

impl TextSignal {
    /// Fusion inputs of this signal
    pub fn features(&self) -> TextFeatures {
        TextFeatures::new(self.valence, self.motivation_score)
    }

    /// First matched keyword, if any
    pub fn first_keyword(&self) -> Option<&str> {
        self.keywords.first().map(String::as_str)
    }
}

/// Facial emotion labels understood by the fusion table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FaceEmotion {
    /// angry
    Angry,
    /// disgust
    Disgust,
    /// fear
    Fear,
    /// happy
    Happy,
    /// sad / sadness
    Sad,
    /// surprise
    Surprise,
    /// neutral
    Neutral,
    /// A label outside the fixed set, kept verbatim (lower-cased)
    Other(String),
    /// No face was found in the image
    NoFace,
}

impl FaceEmotion {
    /// Canonical label
    pub fn as_str(&self) -> &str {
        match self {
            FaceEmotion::Angry => "angry",
            FaceEmotion::Disgust => "disgust",
            FaceEmotion::Fear => "fear",
            FaceEmotion::Happy => "happy",
            FaceEmotion::Sad => "sad",
            FaceEmotion::Surprise => "surprise",
            FaceEmotion::Neutral => "neutral",
            FaceEmotion::Other(label) => label.as_str(),
            FaceEmotion::NoFace => NO_FACE_LABEL,
        }
    }

    /// Whether this is the no-face sentinel
    pub fn is_no_face(&self) -> bool {
        matches!(self, FaceEmotion::NoFace)
    }
}

impl From<&str> for FaceEmotion {
    fn from(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        match label.as_str() {
            "angry" => FaceEmotion::Angry,
            "disgust" => FaceEmotion::Disgust,
            "fear" => FaceEmotion::Fear,
            "happy" => FaceEmotion::Happy,
            "sad" | "sadness" => FaceEmotion::Sad,
            "surprise" => FaceEmotion::Surprise,
            "neutral" => FaceEmotion::Neutral,
            NO_FACE_LABEL => FaceEmotion::NoFace,
            _ => FaceEmotion::Other(label),
        }
    }
}

impl From<String> for FaceEmotion {
    fn from(label: String) -> Self {
        FaceEmotion::from(label.as_str())
    }
}

impl From<FaceEmotion> for String {
    fn from(emotion: FaceEmotion) -> Self {
        emotion.as_str().to_string()
    }
}

impl fmt::Display for FaceEmotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a face emotion classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceSignal {
    /// Dominant emotion of the primary face, or the no-face sentinel
    pub dominant_emotion: FaceEmotion,
    /// Probability of the dominant emotion (0.0 to 1.0)
    pub confidence: f64,
}

impl FaceSignal {
    /// Create a face signal, clamping confidence to [0, 1]
    pub fn new(dominant_emotion: impl Into<FaceEmotion>, confidence: f64) -> Self {
        Self {
            dominant_emotion: dominant_emotion.into(),
            confidence: clamp_unit(confidence, 0.0),
        }
    }

    /// The no-face sentinel with confidence 0
    pub fn no_face() -> Self {
        Self {
            dominant_emotion: FaceEmotion::NoFace,
            confidence: 0.0,
        }
    }

    /// Whether an actual face was detected
    pub fn is_detected(&self) -> bool {
        !self.dominant_emotion.is_no_face()
    }
}

/// Clamp into [0, 1]; non-finite values become `fallback`
pub(crate) fn clamp_unit(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        fallback
    }
}
