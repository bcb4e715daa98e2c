//! Run orchestration: validate, fetch the trailing window, write once.
//!
//! A [`Pipeline`] owns the clients for one process. It holds no per-run state,
//! so the same value serves every invocation (CLI: one; Lambda: many).
//!
//! # Flow
//!
//! 1. Reject the run with a 400 envelope if no API key was supplied
//! 2. For each of the [`WINDOW_DAYS`] dates ending today, newest first, fetch
//!    and annotate that day's articles; failed days are logged and skipped
//! 3. Write the accumulated batch once and return 200, or return 500 without
//!    writing if nothing was accumulated

use crate::error::StorageError;
use crate::guardian::GuardianClient;
use crate::models::{Article, InvocationParams, InvocationResponse};
use crate::outputs::json::write_articles;
use crate::outputs::s3::{BlobStore, Destination};
use crate::sentiment::SentimentAnalyzer;
use crate::utils::{WINDOW_DAYS, trailing_window};
use chrono::NaiveDate;
use std::time::Instant;
use tracing::{error, info, instrument, warn};

pub const MISSING_API_KEY: &str = "API key is required";
pub const NO_ARTICLES: &str = "No articles fetched";

/// The injected clients a run needs.
#[derive(Debug)]
pub struct Pipeline<A, B> {
    pub guardian: GuardianClient,
    pub analyzer: A,
    pub store: B,
    pub destination: Destination,
}

impl<A, B> Pipeline<A, B>
where
    A: SentimentAnalyzer,
    B: BlobStore,
{
    pub fn new(guardian: GuardianClient, analyzer: A, store: B, destination: Destination) -> Self {
        Self {
            guardian,
            analyzer,
            store,
            destination,
        }
    }

    /// Run from a raw event payload.
    ///
    /// A `null` payload is treated as an empty object. A payload that cannot be
    /// read as [`InvocationParams`] is answered with a 400 envelope.
    ///
    /// # Errors
    ///
    /// Propagates [`StorageError`] from [`Pipeline::run`].
    pub async fn handle_event(
        &self,
        event: serde_json::Value,
        today: NaiveDate,
    ) -> Result<InvocationResponse, StorageError> {
        let params = if event.is_null() {
            InvocationParams::default()
        } else {
            match serde_json::from_value::<InvocationParams>(event) {
                Ok(params) => params,
                Err(e) => {
                    warn!(error = %e, "Rejecting malformed invocation event");
                    return Ok(InvocationResponse::error(
                        400,
                        &format!("Invalid invocation parameters: {e}"),
                    ));
                }
            }
        };
        self.run(&params, today).await
    }

    /// Execute one run for the window ending on `today`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the final upload fails. Every other failure
    /// is reported through the returned envelope or skipped.
    #[instrument(level = "info", skip_all, fields(%today, query = %params.query, page_size = params.page_size))]
    pub async fn run(
        &self,
        params: &InvocationParams,
        today: NaiveDate,
    ) -> Result<InvocationResponse, StorageError> {
        let Some(api_key) = params.api_key() else {
            warn!("No API key supplied; nothing fetched");
            return Ok(InvocationResponse::error(400, MISSING_API_KEY));
        };

        let t0 = Instant::now();
        let mut all_articles: Vec<Article> = Vec::new();
        let mut failed_days = 0usize;

        for date in trailing_window(today, WINDOW_DAYS) {
            info!(%date, "Fetching news for date");
            match self
                .guardian
                .fetch(api_key, &params.query, params.page_size, date, &self.analyzer)
                .await
            {
                Ok(articles) => all_articles.extend(articles),
                Err(e) => {
                    failed_days += 1;
                    warn!(
                        %date,
                        kind = e.kind(),
                        message = %e.message(),
                        "Error fetching articles; skipping date"
                    );
                }
            }
        }

        info!(
            total = all_articles.len(),
            failed_days,
            elapsed_ms = t0.elapsed().as_millis(),
            "Finished fetching window"
        );

        if all_articles.is_empty() {
            error!("No articles fetched across the window; nothing written");
            return Ok(InvocationResponse::error(500, NO_ARTICLES));
        }

        write_articles(&self.store, &self.destination, &all_articles).await?;
        Ok(InvocationResponse::ok(format!(
            "Data written to S3: {}",
            self.destination
        )))
    }
}
