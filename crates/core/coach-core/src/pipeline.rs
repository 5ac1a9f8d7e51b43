//! Submission pipeline
//!
//! One journal submission runs one linear pipeline:
//! classify text → classify face → fuse → generate feedback → persist.
//!
//! Face analysis and persistence are best-effort: their failures are
//! reported in the `SubmissionReport` instead of failing the submission.
//! Text classification is mandatory and its failure is returned as an error.

use crate::classifier::{truncate_for_sentiment, FaceClassifier, ImageInput, SentimentClassifier};
use crate::feedback::FeedbackGenerator;
use crate::features::extract_text_signal;
use crate::fusion::fuse;
use crate::storage::JournalStore;
use crate::types::{
    FaceSignal, Feedback, FusionResult, FusionWeights, JournalEntry, NewJournalEntry, TextSignal,
};
use crate::{CoachError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// One user submission
#[derive(Debug, Clone, Default)]
pub struct Submission {
    /// Journal text (required, non-blank)
    pub text: String,
    /// Optional selfie
    pub image: Option<ImageInput>,
    /// Optional display name for the feedback
    pub name: Option<String>,
}

impl Submission {
    /// Text-only submission
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Attach an image
    pub fn with_image(mut self, image: ImageInput) -> Self {
        self.image = Some(image);
        self
    }

    /// Attach a display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// What happened to the optional face analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FaceOutcome {
    /// No image was supplied
    NotProvided,
    /// The classifier ran (the signal may still be the no-face sentinel)
    Analyzed,
    /// An image was supplied but no face classifier is configured
    Unavailable,
    /// The classifier failed; the face was treated as absent
    Failed {
        /// Failure description
        reason: String,
    },
}

/// What happened to the journal record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StorageOutcome {
    /// Appended with this id
    Saved {
        /// Store-assigned id
        id: i64,
    },
    /// The store rejected the record; nothing was saved
    Failed {
        /// Failure description
        reason: String,
    },
}

impl StorageOutcome {
    /// Whether the record was saved
    pub fn is_saved(&self) -> bool {
        matches!(self, StorageOutcome::Saved { .. })
    }
}

/// Everything a caller needs to present one submission
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReport {
    /// Text analysis
    pub text_signal: TextSignal,
    /// Face analysis used for fusion, if any
    pub face_signal: Option<FaceSignal>,
    /// Face analysis status
    pub face_outcome: FaceOutcome,
    /// Fused mood
    pub fusion: FusionResult,
    /// Supportive message and rationale
    pub feedback: Feedback,
    /// Persistence status
    pub storage: StorageOutcome,
}

/// The journaling pipeline with its injected capabilities
pub struct CoachPipeline {
    sentiment: Arc<dyn SentimentClassifier>,
    face: Option<Arc<dyn FaceClassifier>>,
    store: Arc<dyn JournalStore>,
    feedback: FeedbackGenerator,
    weights: FusionWeights,
    rng: Mutex<StdRng>,
}

impl CoachPipeline {
    /// Create a pipeline with a sentiment classifier and a store.
    ///
    /// Face analysis is disabled until `with_face_classifier` is called.
    pub fn new(
        sentiment: Arc<dyn SentimentClassifier>,
        store: Arc<dyn JournalStore>,
    ) -> Result<Self> {
        Ok(Self {
            sentiment,
            face: None,
            store,
            feedback: FeedbackGenerator::new()?,
            weights: FusionWeights::default(),
            rng: Mutex::new(StdRng::from_entropy()),
        })
    }

    /// Enable face analysis
    pub fn with_face_classifier(mut self, face: Arc<dyn FaceClassifier>) -> Self {
        self.face = Some(face);
        self
    }

    /// Override the default (0.6, 0.4) fusion weights
    pub fn with_weights(mut self, weights: FusionWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Make feedback selection reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Run one submission end to end
    #[tracing::instrument(skip_all, fields(text_len = submission.text.len(), has_image = submission.image.is_some()))]
    pub async fn submit(&self, submission: Submission) -> Result<SubmissionReport> {
        let text = submission.text.as_str();
        if text.trim().is_empty() {
            return Err(CoachError::validation(
                "Please write something in the journal entry before analyzing.",
            ));
        }

        let sentiment = self
            .sentiment
            .classify(truncate_for_sentiment(text))
            .await?;
        let text_signal = extract_text_signal(text, &sentiment);
        debug!(
            label = %text_signal.label,
            valence = text_signal.valence,
            motivation = text_signal.motivation_score,
            keywords = text_signal.keywords.len(),
            "Text analysed"
        );

        let (face_signal, face_outcome) = self.analyze_face(submission.image.as_ref()).await;

        let fusion = fuse(&text_signal.features(), face_signal.as_ref(), self.weights);
        info!(
            mood_score = fusion.mood_score,
            category = %fusion.category,
            "Mood fused"
        );

        let feedback = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            self.feedback.generate(
                &mut *rng,
                &fusion,
                &text_signal,
                face_signal.as_ref(),
                submission.name.as_deref(),
            )?
        };

        let entry = NewJournalEntry::from_submission(
            text,
            &feedback,
            &fusion,
            &text_signal,
            face_signal.as_ref(),
        );
        let storage = match self.store.append(entry).await {
            Ok(saved) => {
                info!(id = saved.id, "Journal entry saved");
                StorageOutcome::Saved { id: saved.id }
            }
            Err(e) => {
                warn!("Failed to save journal entry: {}", e);
                StorageOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        Ok(SubmissionReport {
            text_signal,
            face_signal,
            face_outcome,
            fusion,
            feedback,
            storage,
        })
    }

    /// All saved entries, most recent first
    pub async fn history(&self) -> Result<Vec<JournalEntry>> {
        self.store.list_all().await
    }

    async fn analyze_face(&self, image: Option<&ImageInput>) -> (Option<FaceSignal>, FaceOutcome) {
        let Some(image) = image else {
            return (None, FaceOutcome::NotProvided);
        };

        let Some(classifier) = &self.face else {
            warn!("Image supplied but face analysis is not configured; ignoring it");
            return (None, FaceOutcome::Unavailable);
        };

        match classifier.classify(image).await {
            Ok(signal) => {
                debug!(
                    emotion = %signal.dominant_emotion,
                    confidence = signal.confidence,
                    "Face analysed"
                );
                (Some(signal), FaceOutcome::Analyzed)
            }
            Err(e) => {
                warn!("Face analysis failed, continuing without it: {}", e);
                (
                    Some(FaceSignal::no_face()),
                    FaceOutcome::Failed {
                        reason: e.to_string(),
                    },
                )
            }
        }
    }
}
