//! Habit Coach classifier providers
//!
//! Supports sentiment and face emotion inference via:
//! - A local HTTP inference server (Hugging Face compatible text classification
//!   plus a face detection endpoint)
//! - A built-in word lexicon for fully offline sentiment

#![warn(missing_docs)]
#![warn(clippy::all)]

use coach_core::Result;
use reqwest::Client;
use std::time::Duration;

pub mod http;
pub mod lexicon;

pub use http::{
    parse_face_response, parse_sentiment_response, HttpFaceClassifier, HttpSentimentClassifier,
};
pub use lexicon::LexiconSentimentClassifier;

/// Build an HTTP client for talking to a local inference server
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .pool_idle_timeout(Duration::from_secs(300))
        .tcp_keepalive(Duration::from_secs(60))
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .build()?;
    Ok(client)
}
