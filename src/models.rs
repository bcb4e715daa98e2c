//! Data models for fetched articles, their sentiment, and the invocation envelope.
//!
//! This module defines the core data structures used throughout the job:
//! - [`Article`]: A Guardian search result enriched with sentiment
//! - [`Sentiment`]: Either a classification from the sentiment service or a failure
//! - [`InvocationParams`]: The parameters a single run is invoked with
//! - [`InvocationResponse`]: The `{statusCode, body}` envelope a run returns
//!
//! The serialized form of [`Article`] is the record layout written to S3, one
//! object per line. Field names are snake_case and match what the downstream
//! crawler expects.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Summary used when a search result carries no `trailText`.
pub const SUMMARY_PLACEHOLDER: &str = "No summary available";

/// Label written in place of a classification when sentiment detection failed.
pub const SENTIMENT_ERROR_LABEL: &str = "ERROR";

pub const DEFAULT_QUERY: &str = "latest";
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// A news article annotated with sentiment.
///
/// Built by the fetcher for each search result and never mutated afterwards.
/// The `sentiment` field flattens into two record fields, `sentiment` and
/// `sentiment_scores`, so the serialized order is:
/// headline, summary, url, sentiment, sentiment_scores, publication_date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    /// The article headline (`webTitle`).
    pub headline: String,
    /// The standfirst (`fields.trailText`), or [`SUMMARY_PLACEHOLDER`].
    pub summary: String,
    /// Canonical article URL (`webUrl`).
    pub url: String,
    /// Sentiment of the summary.
    #[serde(flatten)]
    pub sentiment: Sentiment,
    /// ISO-8601 timestamp as supplied by the API (`webPublicationDate`).
    pub publication_date: String,
}

/// The coarse sentiment categories the service can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
            SentimentLabel::Mixed => "MIXED",
        }
    }

    /// Parse the service's label, case-insensitively.
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_ascii_uppercase().as_str() {
            "POSITIVE" => Some(SentimentLabel::Positive),
            "NEGATIVE" => Some(SentimentLabel::Negative),
            "NEUTRAL" => Some(SentimentLabel::Neutral),
            "MIXED" => Some(SentimentLabel::Mixed),
            _ => None,
        }
    }
}

/// Per-category confidence, keyed `Positive`, `Negative`, `Neutral`, `Mixed`.
pub type SentimentScores = BTreeMap<String, f32>;

/// Outcome of classifying one piece of text.
///
/// `Failed` is an expected value, not an exceptional one: an outage of the
/// sentiment service degrades the output but never drops the article.
#[derive(Debug, Clone, PartialEq)]
pub enum Sentiment {
    Classified {
        label: SentimentLabel,
        scores: SentimentScores,
    },
    Failed {
        reason: String,
    },
}

impl Sentiment {
    /// The label as written to the output record (`ERROR` on failure).
    pub fn label(&self) -> &str {
        match self {
            Sentiment::Classified { label, .. } => label.as_str(),
            Sentiment::Failed { .. } => SENTIMENT_ERROR_LABEL,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Sentiment::Failed { .. })
    }
}

impl Serialize for Sentiment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let empty = SentimentScores::new();
        let scores = match self {
            Sentiment::Classified { scores, .. } => scores,
            Sentiment::Failed { .. } => &empty,
        };
        let mut state = serializer.serialize_struct("Sentiment", 2)?;
        state.serialize_field("sentiment", self.label())?;
        state.serialize_field("sentiment_scores", scores)?;
        state.end()
    }
}

/// Parameters for one run, shaped like the scheduler's event payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InvocationParams {
    /// Guardian Open Platform key. Required; an empty string counts as missing.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_query")]
    pub query: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_query() -> String {
    DEFAULT_QUERY.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl InvocationParams {
    /// The API key, if one was supplied and it is non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

impl Default for InvocationParams {
    fn default() -> Self {
        Self {
            api_key: None,
            query: default_query(),
            page_size: default_page_size(),
        }
    }
}

/// The `{statusCode, body}` envelope returned by every run.
///
/// On error statuses the body is itself a JSON document (`{"error": "..."}`)
/// encoded as a string; on success it is plain confirmation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }

    pub fn error(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: serde_json::json!({ "error": message }).to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
