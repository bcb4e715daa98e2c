//! # Guardian News Sentiment
//!
//! A batch job that pulls recent articles from the Guardian content API,
//! tags each with a sentiment label from Amazon Comprehend, and writes the
//! whole batch to S3 as newline-delimited JSON for crawler-based analytics.
//!
//! ## Usage
//!
//! ```sh
//! GUARDIAN_API_KEY=... guardian_news_sentiment --query climate --page-size 2
//! guardian_news_sentiment --event event.json
//! ```
//!
//! ## Architecture
//!
//! The job is a strictly sequential pipeline:
//! 1. **Validation**: Reject runs without an API key
//! 2. **Fetching**: Search each of the last five days, newest first
//! 3. **Annotation**: One sentiment call per article summary
//! 4. **Output**: One newline-delimited JSON object written to S3, replacing the last run

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tokio::io::AsyncReadExt;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod guardian;
mod handler;
mod lambda;
mod models;
mod outputs;
mod sentiment;
mod utils;

#[cfg(test)]
mod testing;

use cli::Cli;
use config::Settings;
use guardian::GuardianClient;
use handler::Pipeline;
use outputs::s3::S3Store;
use sentiment::ComprehendAnalyzer;

#[tokio::main]
#[instrument]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("guardian_news_sentiment starting up");

    let args = Cli::parse();
    debug!(?args.config, ?args.event, query = %args.query, page_size = args.page_size, "Parsed CLI arguments");

    let settings = Settings::load(args.config.as_deref())
        .await?
        .with_overrides(args.bucket.clone(), args.key.clone());

    // ---- Clients, built once per process ----
    let http = reqwest::Client::builder()
        .user_agent(concat!("guardian_news_sentiment/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let guardian = GuardianClient::new(http, settings.search_url()?);
    let analyzer =
        ComprehendAnalyzer::from_env(&settings.sentiment_region, &settings.language_code).await;
    let store = S3Store::from_env().await;
    info!(
        search_url = %guardian.search_url(),
        sentiment_region = %settings.sentiment_region,
        destination = %settings.destination(),
        "Clients initialized"
    );
    let pipeline = Pipeline::new(guardian, analyzer, store, settings.destination());

    if lambda::runtime_detected() {
        lambda::serve(&pipeline).await?;
        return Ok(ExitCode::SUCCESS);
    }

    // ---- Single run ----
    let today = Utc::now().date_naive();
    let result = match &args.event {
        Some(path) => {
            let event = read_event(path).await?;
            pipeline.handle_event(event, today).await
        }
        None => pipeline.run(&args.params(), today).await,
    };

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "Run failed while writing output");
            return Err(e.into());
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        status_code = response.status_code,
        "Execution complete"
    );

    Ok(if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Read a JSON event document from `path`, or from stdin when `path` is `-`.
#[instrument(level = "info")]
async fn read_event(path: &str) -> Result<serde_json::Value, Box<dyn Error>> {
    let text = if path == "-" {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        buf
    } else {
        tokio::fs::read_to_string(path).await?
    };
    Ok(serde_json::from_str(&text)?)
}
