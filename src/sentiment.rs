//! Sentiment annotation backed by Amazon Comprehend.
//!
//! The module uses a trait-based design so the orchestrator can be tested
//! without AWS:
//! - [`SentimentAnalyzer`]: Core trait, one `DetectSentiment`-style call
//! - [`ComprehendAnalyzer`]: Production implementation over `aws-sdk-comprehend`
//! - [`classify`]: The boundary that turns any failure into [`Sentiment::Failed`]
//!
//! There is no retry. A throttled or unavailable service yields `Failed` for
//! that article and the run carries on.

use crate::error::SentimentServiceError;
use crate::models::{Sentiment, SentimentLabel, SentimentScores};
use crate::utils::truncate_for_log;
use aws_config::BehaviorVersion;
use aws_sdk_comprehend::config::Region;
use aws_sdk_comprehend::error::DisplayErrorContext;
use aws_sdk_comprehend::types::LanguageCode;
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// A classification returned by the sentiment service.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: SentimentLabel,
    pub scores: SentimentScores,
}

/// Trait for a text sentiment classifier.
pub trait SentimentAnalyzer {
    /// Classify `text`, returning the service's label and per-category scores.
    async fn detect(&self, text: &str) -> Result<Classification, SentimentServiceError>;
}

/// [`SentimentAnalyzer`] over the Comprehend `DetectSentiment` API.
#[derive(Debug, Clone)]
pub struct ComprehendAnalyzer {
    client: aws_sdk_comprehend::Client,
    language: LanguageCode,
}

impl ComprehendAnalyzer {
    pub fn new(client: aws_sdk_comprehend::Client, language_code: &str) -> Self {
        Self {
            client,
            language: LanguageCode::from(language_code),
        }
    }

    /// Build a client from the default AWS credential chain, pinned to `region`.
    pub async fn from_env(region: &str, language_code: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self::new(aws_sdk_comprehend::Client::new(&config), language_code)
    }
}

impl SentimentAnalyzer for ComprehendAnalyzer {
    async fn detect(&self, text: &str) -> Result<Classification, SentimentServiceError> {
        let output = self
            .client
            .detect_sentiment()
            .text(text)
            .language_code(self.language.clone())
            .send()
            .await
            .map_err(|e| SentimentServiceError::Service(DisplayErrorContext(&e).to_string()))?;

        let raw_label = output
            .sentiment()
            .ok_or(SentimentServiceError::MissingLabel)?
            .as_str();
        let label = SentimentLabel::parse(raw_label)
            .ok_or_else(|| SentimentServiceError::UnknownLabel(raw_label.to_string()))?;

        let mut scores = SentimentScores::new();
        if let Some(s) = output.sentiment_score() {
            let pairs = [
                ("Positive", s.positive()),
                ("Negative", s.negative()),
                ("Neutral", s.neutral()),
                ("Mixed", s.mixed()),
            ];
            for (name, value) in pairs {
                if let Some(v) = value {
                    scores.insert(name.to_string(), v);
                }
            }
        }

        Ok(Classification { label, scores })
    }
}

/// Classify `text`, never failing.
///
/// Blank input is not sent to the service, which would reject it anyway.
/// Any error is logged and returned as [`Sentiment::Failed`].
#[instrument(level = "info", skip_all, fields(bytes = text.len()))]
pub async fn classify<A: SentimentAnalyzer>(analyzer: &A, text: &str) -> Sentiment {
    if text.trim().is_empty() {
        warn!("Refusing to classify blank text");
        return Sentiment::Failed {
            reason: "blank text".to_string(),
        };
    }

    let t0 = Instant::now();
    match analyzer.detect(text).await {
        Ok(Classification { label, scores }) => {
            debug!(
                label = label.as_str(),
                elapsed_ms = t0.elapsed().as_millis(),
                "Classified text"
            );
            Sentiment::Classified { label, scores }
        }
        Err(e) => {
            warn!(
                error = %e,
                text_preview = %truncate_for_log(text, 80),
                "Sentiment detection failed; recording ERROR"
            );
            Sentiment::Failed {
                reason: e.to_string(),
            }
        }
    }
}
