//! Error types for each stage of the job.
//!
//! Only [`StorageError`] ever escapes a run. Fetch failures are logged and the
//! date is skipped; sentiment failures become [`crate::models::Sentiment::Failed`].

use thiserror::Error;

/// A failed search for one date.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure, non-2xx status, or a body that could not be decoded.
    #[error("RequestException: {0}")]
    Request(reqwest::Error),

    /// The API answered but its envelope status was not `ok`.
    #[error("API response error: {0}")]
    Api(String),
}

// The request URL carries the api-key query parameter, so it never reaches logs.
impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Request(e.without_url())
    }
}

impl FetchError {
    /// Short category name reported alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Request(_) => "RequestException",
            FetchError::Api(_) => "API response error",
        }
    }

    pub fn message(&self) -> String {
        match self {
            FetchError::Request(e) => e.to_string(),
            FetchError::Api(msg) => msg.clone(),
        }
    }
}

/// Failure calling the sentiment service.
#[derive(Debug, Error)]
pub enum SentimentServiceError {
    #[error("sentiment service call failed: {0}")]
    Service(String),

    #[error("unrecognised sentiment label: {0}")]
    UnknownLabel(String),

    #[error("sentiment response carried no label")]
    MissingLabel,
}

/// Failure persisting the batch.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to serialize article: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to upload s3://{bucket}/{key}: {message}")]
    Upload {
        bucket: String,
        key: String,
        message: String,
    },
}

/// Failure loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid search URL '{url}': {source}")]
    SearchUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
