//! Configuration management and environment variable loading

use crate::types::FusionWeights;
use crate::{CoachError, Result};
use std::env;

/// Load environment variables from a .env file
///
/// A missing file is not an error; the process environment is used as-is.
pub fn load_env() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::info!("Loaded environment from: {}", path.display());
            Ok(())
        }
        Err(dotenvy::Error::LineParse(line, pos)) => Err(CoachError::config(format!(
            "Failed to parse .env file at line {}, position {}",
            line, pos
        ))),
        Err(dotenvy::Error::Io(_)) => {
            tracing::debug!("No .env file found - using system environment variables only");
            Ok(())
        }
        Err(e) => Err(CoachError::config(format!(
            "Failed to load .env file: {}",
            e
        ))),
    }
}

/// Get optional environment variable with default
pub fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get environment variable as boolean
pub fn get_env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|v| match v.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

/// Get environment variable as integer
pub fn get_env_int<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Get environment variable as float
pub fn get_env_float(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(default)
}

/// Which sentiment backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBackend {
    /// Built-in word lexicon, no model server needed
    Lexicon,
    /// Hugging Face compatible inference server
    Http,
}

impl std::str::FromStr for SentimentBackend {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "lexicon" | "local" => Ok(SentimentBackend::Lexicon),
            "http" | "remote" => Ok(SentimentBackend::Http),
            other => Err(CoachError::config(format!(
                "Unknown sentiment backend '{}', expected 'lexicon' or 'http'",
                other
            ))),
        }
    }
}

/// Default SQLite location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/entries.db";

/// Default inference server
pub const DEFAULT_INFERENCE_URL: &str = "http://localhost:8080";

/// Default sentiment model
pub const DEFAULT_SENTIMENT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";

/// Runtime configuration for the journal
#[derive(Debug, Clone)]
pub struct CoachConfig {
    /// SQLite connection URL
    pub database_url: String,
    /// Sentiment backend
    pub sentiment_backend: SentimentBackend,
    /// Base URL of the inference server
    pub inference_url: String,
    /// Sentiment model id on the inference server
    pub sentiment_model: String,
    /// Whether to run face analysis on supplied images
    pub face_enabled: bool,
    /// Fusion weights
    pub weights: FusionWeights,
    /// HTTP request timeout for inference calls
    pub request_timeout_secs: u64,
    /// Fixed RNG seed for reproducible feedback
    pub seed: Option<u64>,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            sentiment_backend: SentimentBackend::Lexicon,
            inference_url: DEFAULT_INFERENCE_URL.to_string(),
            sentiment_model: DEFAULT_SENTIMENT_MODEL.to_string(),
            face_enabled: false,
            weights: FusionWeights::default(),
            request_timeout_secs: 120,
            seed: None,
        }
    }
}

impl CoachConfig {
    /// Build configuration from `COACH_*` environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let sentiment_backend = get_env_or("COACH_SENTIMENT_BACKEND", "lexicon").parse()?;
        let weights = FusionWeights::new(
            get_env_float("COACH_TEXT_WEIGHT", defaults.weights.text),
            get_env_float("COACH_FACE_WEIGHT", defaults.weights.face),
        )?;

        let seed = match env::var("COACH_SEED") {
            Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                CoachError::config(format!("COACH_SEED must be an unsigned integer: {}", e))
            })?),
            Err(_) => None,
        };

        Ok(Self {
            database_url: get_env_or("COACH_DATABASE_URL", &defaults.database_url),
            sentiment_backend,
            inference_url: get_env_or("COACH_INFERENCE_URL", &defaults.inference_url),
            sentiment_model: get_env_or("COACH_SENTIMENT_MODEL", &defaults.sentiment_model),
            face_enabled: get_env_bool("COACH_FACE_ENABLED", defaults.face_enabled),
            weights,
            request_timeout_secs: get_env_int(
                "COACH_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
            seed,
        })
    }
}
