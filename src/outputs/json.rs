//! Newline-delimited JSON output for batch ingestion.
//!
//! Each article becomes one JSON object on its own line. The batch is not
//! wrapped in an array: crawler-style ingestion reads one record per line.
//!
//! # Output Structure
//!
//! ```text
//! {"headline":"...","summary":"...","url":"...","sentiment":"POSITIVE","sentiment_scores":{...},"publication_date":"..."}
//! {"headline":"...","summary":"...","url":"...","sentiment":"ERROR","sentiment_scores":{},"publication_date":"..."}
//! ```
//!
//! Lines are joined with `\n` and there is no trailing newline.

use crate::error::StorageError;
use crate::models::Article;
use crate::outputs::s3::{BlobStore, Destination};
use tracing::{error, info, instrument};

pub const CONTENT_TYPE: &str = "application/json";

/// Render `articles` as newline-delimited JSON.
pub fn to_json_lines(articles: &[Article]) -> Result<String, serde_json::Error> {
    let lines = articles
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}

/// Serialize `articles` and upload them as a single object at `destination`.
///
/// Whatever previously existed at the key is replaced.
///
/// # Errors
///
/// Returns [`StorageError`] if serialization or the upload fails. The caller
/// is expected to let this abort the run.
#[instrument(level = "info", skip_all, fields(destination = %destination, count = articles.len()))]
pub async fn write_articles<B: BlobStore>(
    store: &B,
    destination: &Destination,
    articles: &[Article],
) -> Result<(), StorageError> {
    let body = to_json_lines(articles)?;
    let bytes = body.len();

    if let Err(e) = store.put_object(destination, body.into_bytes(), CONTENT_TYPE).await {
        error!(error = %e, "Failed to write articles");
        return Err(e);
    }

    info!(bytes, "Data written to {destination}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Sentiment, SentimentLabel, SentimentScores};
    use crate::testing::MemoryStore;
    use serde_json::Value;

    fn article(n: usize, sentiment: Sentiment) -> Article {
        Article {
            headline: format!("Headline {n}"),
            summary: format!("Summary with \"quotes\"\nand a newline {n}"),
            url: format!("https://www.theguardian.com/{n}"),
            sentiment,
            publication_date: "2026-10-18T12:00:00Z".to_string(),
        }
    }

    fn classified() -> Sentiment {
        Sentiment::Classified {
            label: SentimentLabel::Mixed,
            scores: SentimentScores::from([("Mixed".to_string(), 0.5)]),
        }
    }

    #[test]
    fn test_to_json_lines_one_object_per_line() {
        let articles = vec![
            article(0, classified()),
            article(1, Sentiment::Failed {
                reason: "boom".to_string(),
            }),
            article(2, classified()),
        ];
        let body = to_json_lines(&articles).unwrap();

        assert!(!body.starts_with('['));
        assert!(!body.ends_with('\n'));
        let lines: Vec<&str> = body.split('\n').collect();
        assert_eq!(lines.len(), 3);
        for (i, line) in lines.iter().enumerate() {
            let v: Value = serde_json::from_str(line).unwrap();
            assert_eq!(v["headline"], format!("Headline {i}"));
        }
        let second: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["sentiment"], "ERROR");
    }

    #[test]
    fn test_to_json_lines_empty() {
        assert_eq!(to_json_lines(&[]).unwrap(), "");
    }

    #[tokio::test]
    async fn test_write_articles_uploads_with_content_type() {
        let store = MemoryStore::default();
        let destination = Destination::new("guardianews", "guardian-news.json");
        let articles = vec![article(0, classified()), article(1, classified())];

        write_articles(&store, &destination, &articles).await.unwrap();

        let (body, content_type) = store.object(&destination).expect("object written");
        assert_eq!(content_type, "application/json");
        assert_eq!(body.lines().count(), 2);
        assert_eq!(store.puts(), 1);
    }

    #[tokio::test]
    async fn test_write_articles_overwrites_previous_object() {
        let store = MemoryStore::default();
        let destination = Destination::new("guardianews", "guardian-news.json");

        let first: Vec<Article> = (0..4).map(|n| article(n, classified())).collect();
        write_articles(&store, &destination, &first).await.unwrap();
        let second: Vec<Article> = (0..2).map(|n| article(n, classified())).collect();
        write_articles(&store, &destination, &second).await.unwrap();

        let (body, _) = store.object(&destination).unwrap();
        assert_eq!(body.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_write_articles_propagates_upload_failure() {
        let store = MemoryStore::failing("AccessDenied");
        let destination = Destination::new("guardianews", "guardian-news.json");

        let err = write_articles(&store, &destination, &[article(0, classified())])
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Upload { .. }));
        assert!(err.to_string().contains("AccessDenied"));
    }
}
