//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! All arguments can be provided via command-line flags or environment variables.

use crate::models::{DEFAULT_PAGE_SIZE, DEFAULT_QUERY, InvocationParams};
use clap::Parser;

/// Command-line arguments for a single run.
///
/// The invocation parameters (`api_key`, `query`, `page_size`) come either from
/// the individual flags or, with `--event`, from a JSON event document shaped
/// exactly like the scheduler's payload. When `--event` is given it takes
/// precedence and the parameter flags (and their environment variables) are
/// ignored.
///
/// # Examples
///
/// ```sh
/// # Key from the environment, default query and page size
/// GUARDIAN_API_KEY=... guardian_news_sentiment
///
/// # Explicit query
/// guardian_news_sentiment --api-key KEY --query climate --page-size 2
///
/// # Replay a scheduler event
/// guardian_news_sentiment --event event.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Guardian Open Platform API key
    #[arg(long, env = "GUARDIAN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Search query
    #[arg(short, long, env = "GUARDIAN_QUERY", default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Maximum number of results requested per day
    #[arg(short, long, env = "GUARDIAN_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Read invocation parameters from a JSON event file ("-" for stdin)
    #[arg(short, long)]
    pub event: Option<String>,

    /// Optional path to a YAML settings file
    #[arg(short, long, env = "NEWS_SENTIMENT_CONFIG")]
    pub config: Option<String>,

    /// Override the destination bucket
    #[arg(long, env = "NEWS_BUCKET")]
    pub bucket: Option<String>,

    /// Override the destination object key
    #[arg(long, env = "NEWS_KEY")]
    pub key: Option<String>,
}

impl Cli {
    /// Invocation parameters taken from the flags.
    pub fn params(&self) -> InvocationParams {
        InvocationParams {
            api_key: self.api_key.clone(),
            query: self.query.clone(),
            page_size: self.page_size,
        }
    }
}
