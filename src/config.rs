//! Runtime settings: where to search, where to classify, where to write.
//!
//! Settings are resolved in three layers, later layers winning:
//! 1. Built-in defaults (production Guardian endpoint, `guardianews` bucket)
//! 2. An optional YAML file passed with `--config`
//! 3. Individual CLI/environment overrides such as `--bucket`
//!
//! # Example
//!
//! ```yaml
//! bucket: my-news-bucket
//! key: guardian/latest.json
//! sentiment_region: eu-west-1
//! ```

use crate::error::ConfigError;
use crate::guardian::DEFAULT_SEARCH_URL;
use crate::outputs::s3::{DEFAULT_BUCKET, DEFAULT_KEY, Destination};
use reqwest::Url;
use serde::Deserialize;
use tokio::fs;
use tracing::{info, instrument};

pub const DEFAULT_SENTIMENT_REGION: &str = "us-east-1";
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Bucket the batch is written to.
    pub bucket: String,
    /// Object key the batch is written to; replaced on every run.
    pub key: String,
    /// Full URL of the Guardian `search` endpoint.
    pub search_url: String,
    /// AWS region for the sentiment service.
    pub sentiment_region: String,
    /// Language hint passed with every sentiment call.
    pub language_code: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_string(),
            key: DEFAULT_KEY.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            sentiment_region: DEFAULT_SENTIMENT_REGION.to_string(),
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or the defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or is not valid YAML
    /// for this shape. Missing fields fall back to their defaults.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_string(),
                source,
            })?;
        let settings = Self::from_yaml(&text, path)?;
        info!(path, "Loaded settings file");
        Ok(settings)
    }

    /// Parse settings from YAML text; `origin` is only used in error messages.
    pub fn from_yaml(text: &str, origin: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as a map.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// Apply per-field overrides, ignoring `None`.
    pub fn with_overrides(mut self, bucket: Option<String>, key: Option<String>) -> Self {
        if let Some(bucket) = bucket {
            self.bucket = bucket;
        }
        if let Some(key) = key {
            self.key = key;
        }
        self
    }

    pub fn destination(&self) -> Destination {
        Destination::new(&self.bucket, &self.key)
    }

    /// The parsed search endpoint.
    pub fn search_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.search_url).map_err(|source| ConfigError::SearchUrl {
            url: self.search_url.clone(),
            source,
        })
    }
}
