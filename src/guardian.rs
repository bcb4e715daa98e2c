//! Guardian Open Platform search client.
//!
//! Fetches one day's worth of articles from the content API's `search`
//! endpoint and enriches each result with a sentiment annotation.
//!
//! # Request Shape
//!
//! ```text
//! GET {base}/search?api-key=K&q=Q&page-size=N&show-fields=trailText
//!                  &from-date=YYYY-MM-DD&to-date=YYYY-MM-DD
//! ```
//!
//! `from-date` and `to-date` are always the same day.
//!
//! # Failure Handling
//!
//! Failures are returned as [`FetchError`] values for the caller to log and
//! skip. Nothing is retried.

use crate::error::FetchError;
use crate::models::{Article, SUMMARY_PLACEHOLDER};
use crate::sentiment::{SentimentAnalyzer, classify};
use crate::utils::format_date;
use chrono::NaiveDate;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, info, instrument};

pub const DEFAULT_SEARCH_URL: &str = "https://content.guardianapis.com/search";

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchResponse,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    status: String,
    message: Option<String>,
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    web_title: String,
    web_url: String,
    web_publication_date: String,
    #[serde(default)]
    fields: Option<ResultFields>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultFields {
    trail_text: Option<String>,
}

/// Client for the Guardian content API `search` endpoint.
///
/// The search URL comes from settings, so tests can point the client at a
/// mock server.
#[derive(Debug, Clone)]
pub struct GuardianClient {
    client: Client,
    search_url: Url,
}

impl GuardianClient {
    pub fn new(client: Client, search_url: Url) -> Self {
        Self { client, search_url }
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    /// Fetch and annotate the articles published on `date`.
    ///
    /// Issues exactly one search request, then one sentiment call per result,
    /// sequentially and in result order.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Request`] on transport failure, non-2xx status, or an
    ///   undecodable body.
    /// - [`FetchError::Api`] when the envelope status is not `ok`; carries the
    ///   upstream message or `"Unknown error"`.
    #[instrument(level = "info", skip_all, fields(date = %date, %query, page_size = page_size))]
    pub async fn fetch<A: SentimentAnalyzer>(
        &self,
        api_key: &str,
        query: &str,
        page_size: u32,
        date: NaiveDate,
        analyzer: &A,
    ) -> Result<Vec<Article>, FetchError> {
        let day = format_date(date);
        let page_size_param = page_size.to_string();
        let params = [
            ("api-key", api_key),
            ("q", query),
            ("page-size", page_size_param.as_str()),
            ("show-fields", "trailText"),
            ("from-date", day.as_str()),
            ("to-date", day.as_str()),
        ];

        let t0 = Instant::now();
        let envelope: SearchEnvelope = self
            .client
            .get(self.search_url.clone())
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!(elapsed_ms = t0.elapsed().as_millis(), "Search request completed");

        let response = envelope.response;
        if response.status != "ok" {
            return Err(FetchError::Api(
                response
                    .message
                    .unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }

        let mut articles = Vec::with_capacity(response.results.len());
        for result in response.results {
            let summary = result
                .fields
                .and_then(|f| f.trail_text)
                .unwrap_or_else(|| SUMMARY_PLACEHOLDER.to_string());
            let sentiment = classify(analyzer, &summary).await;
            articles.push(Article {
                headline: result.web_title,
                summary,
                url: result.web_url,
                sentiment,
                publication_date: result.web_publication_date,
            });
        }

        let failed = articles.iter().filter(|a| a.sentiment.is_failed()).count();
        info!(
            count = articles.len(),
            sentiment_failures = failed,
            elapsed_ms = t0.elapsed().as_millis(),
            "Fetched Guardian articles"
        );
        Ok(articles)
    }
}
