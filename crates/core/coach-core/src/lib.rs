//! Habit Coach Core
//!
//! Types and logic for a privacy-first wellbeing journal:
//!
//! - Text feature extraction (valence, motivation score, keywords)
//! - Multimodal fusion of text and facial emotion into a mood score
//! - Template-based supportive feedback with a seedable random source
//! - Classifier and journal-store capabilities injected at start-up
//! - The submission pipeline tying it all together
//!
//! # Example
//!
//! ```
//! use coach_core::{fuse, FaceSignal, FusionWeights, MoodCategory, TextFeatures};
//!
//! let text = TextFeatures::new(0.8, 0.3);
//! let face = FaceSignal::new("happy", 0.8);
//! let result = fuse(&text, Some(&face), FusionWeights::default());
//!
//! assert!((result.mood_score - 0.748).abs() < 1e-9);
//! assert_eq!(result.category, MoodCategory::High);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classifier;
pub mod config;
pub mod error;
pub mod features;
pub mod feedback;
pub mod fusion;
pub mod pipeline;
pub mod storage;
pub mod templates;
pub mod types;
pub mod utils;

pub use classifier::{
    select_dominant_face, truncate_for_sentiment, FaceClassifier, FaceDetection, ImageFormat,
    ImageInput, SentimentClassifier, MAX_SENTIMENT_CHARS,
};
pub use config::{
    get_env_bool, get_env_float, get_env_int, get_env_or, load_env, CoachConfig, SentimentBackend,
};
pub use error::{CoachError, Result};
pub use features::{extract_text_signal, find_keywords, MOTIVATION_KEYWORDS};
pub use feedback::FeedbackGenerator;
pub use fusion::fuse;
pub use pipeline::{CoachPipeline, FaceOutcome, StorageOutcome, Submission, SubmissionReport};
pub use storage::JournalStore;
pub use templates::TemplateEngine;
pub use types::*;
pub use utils::init_logging;
