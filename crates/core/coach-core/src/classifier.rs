//! Classifier capabilities
//!
//! The pretrained models are consumed through two traits so the pipeline can
//! be wired with real inference backends in production and test doubles in
//! tests. Implementations are built once at start-up and shared read-only.

use crate::types::{FaceSignal, SentimentResult};
use crate::{CoachError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Longest text prefix handed to a sentiment model
pub const MAX_SENTIMENT_CHARS: usize = 512;

/// Text sentiment model
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Classify the polarity of `text`
    async fn classify(&self, text: &str) -> Result<SentimentResult>;
}

/// Facial emotion model
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FaceClassifier: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Detect the dominant emotion of the primary face in `image`.
    ///
    /// Returns the no-face sentinel when no face is found; errors are
    /// reserved for failures of the model or its transport.
    async fn classify(&self, image: &ImageInput) -> Result<FaceSignal>;
}

/// Accepted image encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// JPEG
    Jpeg,
    /// PNG
    Png,
}

impl ImageFormat {
    /// Guess the format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    /// MIME type
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }
}

/// An encoded image supplied with a journal entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    /// Encoded image bytes
    pub data: Vec<u8>,
    /// Encoding of `data`
    pub format: ImageFormat,
}

impl ImageInput {
    /// Wrap already-loaded bytes
    pub fn new(data: Vec<u8>, format: ImageFormat) -> Self {
        Self { data, format }
    }

    /// Load a jpg/jpeg/png file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ImageFormat::from_extension)
            .ok_or_else(|| {
                CoachError::validation(format!(
                    "Unsupported image '{}': expected a jpg, jpeg or png file",
                    path.display()
                ))
            })?;

        let data = std::fs::read(path)?;
        if data.is_empty() {
            return Err(CoachError::validation(format!(
                "Image '{}' is empty",
                path.display()
            )));
        }

        Ok(Self { data, format })
    }
}

/// One face found by a detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceDetection {
    /// Bounding box as [x, y, width, height]
    #[serde(rename = "box")]
    pub bounding_box: [f64; 4],
    /// Probability per emotion label
    pub emotions: BTreeMap<String, f64>,
}

impl FaceDetection {
    /// Bounding box area
    pub fn area(&self) -> f64 {
        self.bounding_box[2].max(0.0) * self.bounding_box[3].max(0.0)
    }
}

/// Reduce raw detections to a single face signal.
///
/// The largest face is taken as the primary one and its most probable
/// emotion becomes the dominant emotion.
pub fn select_dominant_face(detections: &[FaceDetection]) -> FaceSignal {
    let primary = detections
        .iter()
        .max_by(|a, b| a.area().total_cmp(&b.area()));

    primary
        .and_then(|face| {
            face.emotions
                .iter()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(label, p)| FaceSignal::new(label.as_str(), *p))
        })
        .unwrap_or_else(FaceSignal::no_face)
}

/// First `MAX_SENTIMENT_CHARS` characters of `text`
pub fn truncate_for_sentiment(text: &str) -> &str {
    match text.char_indices().nth(MAX_SENTIMENT_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FaceEmotion;

    fn detection(w: f64, h: f64, emotions: &[(&str, f64)]) -> FaceDetection {
        FaceDetection {
            bounding_box: [0.0, 0.0, w, h],
            emotions: emotions
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }

    #[test]
    fn test_select_largest_face() {
        let detections = vec![
            detection(10.0, 10.0, &[("angry", 0.9), ("happy", 0.1)]),
            detection(50.0, 40.0, &[("happy", 0.7), ("sad", 0.2), ("neutral", 0.1)]),
        ];
        let face = select_dominant_face(&detections);
        assert_eq!(face.dominant_emotion, FaceEmotion::Happy);
        assert!((face.confidence - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_no_detections_is_no_face() {
        let face = select_dominant_face(&[]);
        assert_eq!(face, FaceSignal::no_face());

        let face = select_dominant_face(&[detection(5.0, 5.0, &[])]);
        assert!(!face.is_detected());
    }

    #[test]
    fn test_detection_json_uses_box_key() {
        let json = r#"[{"box": [1, 2, 30, 40], "emotions": {"fear": 0.6, "neutral": 0.4}}]"#;
        let detections: Vec<FaceDetection> = serde_json::from_str(json).unwrap();
        assert_eq!(detections[0].area(), 1200.0);
        assert_eq!(select_dominant_face(&detections).dominant_emotion, FaceEmotion::Fear);
    }

    #[test]
    fn test_truncate_for_sentiment() {
        let short = "feeling good";
        assert_eq!(truncate_for_sentiment(short), short);

        let long: String = "é".repeat(600);
        let cut = truncate_for_sentiment(&long);
        assert_eq!(cut.chars().count(), MAX_SENTIMENT_CHARS);
    }

    #[test]
    fn test_image_format_from_extension() {
        assert_eq!(ImageFormat::from_extension("JPG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("gif"), None);
    }

    #[test]
    fn test_image_from_path_rejects_unknown_extension() {
        let err = ImageInput::from_path("selfie.gif").unwrap_err();
        assert!(matches!(err, CoachError::Validation(_)));
    }
}
