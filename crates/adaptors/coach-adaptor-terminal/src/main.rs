//! Habit Coach CLI
//!
//! ## Usage
//! ```bash
//! # Write an entry
//! habit-coach journal --text "Finished my study plan, feeling good"
//!
//! # With a selfie and a name
//! habit-coach journal --text "Long day" --image selfie.jpg --name Ada
//!
//! # Read the entry from stdin
//! echo "Went for a run" | habit-coach journal
//!
//! # Review
//! habit-coach history --limit 10
//! habit-coach trend
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use coach_adaptor_terminal::{
    render_history, render_summary, render_trend, DEFAULT_TREND_HEIGHT,
};
use coach_core::{
    init_logging, load_env, CoachConfig, CoachError, CoachPipeline, FaceClassifier, ImageInput,
    JournalStore, SentimentBackend, SentimentClassifier, Submission,
};
use coach_provider_local::{
    build_http_client, HttpFaceClassifier, HttpSentimentClassifier, LexiconSentimentClassifier,
};
use coach_storage_sql::SqliteJournalStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::info;

/// Habit Coach - private journal with mood scoring and supportive feedback
#[derive(Parser, Debug)]
#[command(name = "habit-coach")]
#[command(about = "Private journal with mood scoring and supportive feedback")]
struct Cli {
    /// SQLite database URL (overrides COACH_DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Seed for reproducible feedback (overrides COACH_SEED)
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a journal entry, show feedback and save it
    Journal {
        /// Entry text; read from stdin when omitted
        #[arg(short, long)]
        text: Option<String>,

        /// Optional selfie (jpg, jpeg or png)
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Name to greet in the feedback
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List saved entries, newest first
    History {
        /// Maximum number of rows
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Chart the mood score over time
    Trend {
        /// Chart height in rows
        #[arg(long, default_value_t = DEFAULT_TREND_HEIGHT)]
        height: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_env()?;
    init_logging();

    let cli = Cli::parse();

    let mut config = CoachConfig::from_env()?;
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let store = Arc::new(
        SqliteJournalStore::new(&config.database_url)
            .await
            .with_context(|| format!("Failed to open journal at {}", config.database_url))?,
    );

    let result = match cli.command {
        Command::Journal { text, image, name } => {
            journal(&config, store.clone(), text, image, name).await
        }
        Command::History { limit } => {
            let entries = store.list_all().await?;
            print!("{}", render_history(&entries, limit));
            Ok(())
        }
        Command::Trend { height } => {
            let entries = store.list_all().await?;
            print!("{}", render_trend(&entries, height));
            Ok(())
        }
    };

    store.close().await;
    result
}

async fn journal(
    config: &CoachConfig,
    store: Arc<SqliteJournalStore>,
    text: Option<String>,
    image: Option<PathBuf>,
    name: Option<String>,
) -> anyhow::Result<()> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read the journal entry from stdin")?;
            buf
        }
    };

    let mut submission = Submission::text(text);
    if let Some(path) = image {
        submission = submission.with_image(ImageInput::from_path(&path)?);
    }
    if let Some(name) = name {
        submission = submission.with_name(name);
    }

    let pipeline = build_pipeline(config, store)?;
    match pipeline.submit(submission).await {
        Ok(report) => {
            print!("{}", render_summary(&report));
            Ok(())
        }
        Err(CoachError::Validation(message)) => {
            eprintln!("{}", message);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn build_pipeline(
    config: &CoachConfig,
    store: Arc<SqliteJournalStore>,
) -> anyhow::Result<CoachPipeline> {
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let needs_http = config.face_enabled || config.sentiment_backend == SentimentBackend::Http;
    let client = if needs_http {
        Some(build_http_client(timeout)?)
    } else {
        None
    };

    let sentiment: Arc<dyn SentimentClassifier> = match (&client, config.sentiment_backend) {
        (Some(client), SentimentBackend::Http) => Arc::new(HttpSentimentClassifier::with_client(
            client.clone(),
            &config.inference_url,
            &config.sentiment_model,
        )),
        _ => Arc::new(LexiconSentimentClassifier::new()),
    };
    info!(backend = sentiment.name(), "Sentiment classifier ready");

    let mut pipeline = CoachPipeline::new(sentiment, store)?.with_weights(config.weights);

    if let (Some(client), true) = (&client, config.face_enabled) {
        let face: Arc<dyn FaceClassifier> = Arc::new(HttpFaceClassifier::with_client(
            client.clone(),
            &config.inference_url,
        ));
        info!(backend = face.name(), "Face classifier ready");
        pipeline = pipeline.with_face_classifier(face);
    }

    if let Some(seed) = config.seed {
        pipeline = pipeline.with_seed(seed);
    }

    Ok(pipeline)
}
