//! Inference server clients
//!
//! Sentiment follows the Hugging Face text-classification protocol:
//! `POST {base}/models/{model}` with `{"inputs": text}`. Faces are sent as
//! base64 to `POST {base}/faces/detect`, which answers with one entry per
//! detected face.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use coach_core::{
    select_dominant_face, CoachError, FaceClassifier, FaceDetection, FaceSignal, ImageInput,
    Result, SentimentClassifier, SentimentLabel, SentimentResult,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Text-classification request
#[derive(Debug, Serialize)]
struct SentimentRequest<'a> {
    inputs: &'a str,
}

/// Face detection request
#[derive(Debug, Serialize)]
struct FaceRequest {
    image: String,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// Servers return either `[[{label, score}, ..]]` or `[{label, score}, ..]`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SentimentResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
    Error { error: String },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FaceResponse {
    Detections(Vec<FaceDetection>),
    Error { error: String },
}

/// Pick the highest-scoring label from a text-classification response
pub fn parse_sentiment_response(body: &str) -> Result<SentimentResult> {
    let response: SentimentResponse = serde_json::from_str(body).map_err(|e| {
        CoachError::classifier(format!("Unexpected sentiment response: {}", e))
    })?;

    let scores = match response {
        SentimentResponse::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
        SentimentResponse::Flat(scores) => scores,
        SentimentResponse::Error { error } => {
            return Err(CoachError::classifier(format!(
                "Sentiment model error: {}",
                error
            )))
        }
    };

    let best = scores
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| CoachError::classifier("Sentiment response contained no labels"))?;

    let label = SentimentLabel::parse(&best.label).ok_or_else(|| {
        CoachError::classifier(format!("Unknown sentiment label '{}'", best.label))
    })?;

    Ok(SentimentResult::new(label, best.score))
}

/// Reduce a face detection response to the primary face's dominant emotion
pub fn parse_face_response(body: &str) -> Result<FaceSignal> {
    let response: FaceResponse = serde_json::from_str(body)
        .map_err(|e| CoachError::classifier(format!("Unexpected face response: {}", e)))?;

    match response {
        FaceResponse::Detections(detections) => Ok(select_dominant_face(&detections)),
        FaceResponse::Error { error } => Err(CoachError::classifier(format!(
            "Face model error: {}",
            error
        ))),
    }
}

/// Body of a successful response, or a classifier error carrying the status
async fn success_body(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(CoachError::classifier(format!(
            "Inference server returned {}: {}",
            status,
            body.chars().take(200).collect::<String>()
        )));
    }
    Ok(body)
}

fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

/// Sentiment classifier backed by a local inference server
pub struct HttpSentimentClassifier {
    client: Client,
    base_url: String,
    model: String,
}

impl HttpSentimentClassifier {
    /// Create a classifier for `model` served at `base_url`
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self::with_client(
            crate::build_http_client(timeout)?,
            base_url,
            model,
        ))
    }

    /// Create a classifier sharing an existing client
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    fn endpoint(&self) -> String {
        join_url(&self.base_url, &format!("models/{}", self.model))
    }
}

#[async_trait]
impl SentimentClassifier for HttpSentimentClassifier {
    fn name(&self) -> &'static str {
        "http-sentiment"
    }

    async fn classify(&self, text: &str) -> Result<SentimentResult> {
        debug!(model = %self.model, chars = text.chars().count(), "Requesting sentiment");

        let response = self
            .client
            .post(self.endpoint())
            .json(&SentimentRequest { inputs: text })
            .send()
            .await?;

        let result = parse_sentiment_response(&success_body(response).await?)?;
        debug!(label = %result.label, confidence = result.confidence, "Sentiment classified");
        Ok(result)
    }
}

/// Face emotion classifier backed by a local inference server
pub struct HttpFaceClassifier {
    client: Client,
    base_url: String,
}

impl HttpFaceClassifier {
    /// Create a classifier for the server at `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self::with_client(crate::build_http_client(timeout)?, base_url))
    }

    /// Create a classifier sharing an existing client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl FaceClassifier for HttpFaceClassifier {
    fn name(&self) -> &'static str {
        "http-face"
    }

    async fn classify(&self, image: &ImageInput) -> Result<FaceSignal> {
        debug!(
            bytes = image.data.len(),
            mime = image.format.mime_type(),
            "Requesting face analysis"
        );

        let response = self
            .client
            .post(join_url(&self.base_url, "faces/detect"))
            .json(&FaceRequest {
                image: BASE64.encode(&image.data),
            })
            .send()
            .await?;

        let face = parse_face_response(&success_body(response).await?)?;
        debug!(emotion = %face.dominant_emotion, confidence = face.confidence, "Face analyzed");
        Ok(face)
    }
}
