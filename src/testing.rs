//! Test doubles for the sentiment service and blob store, plus search fixtures.

use crate::error::{SentimentServiceError, StorageError};
use crate::models::{SentimentLabel, SentimentScores};
use crate::outputs::s3::{BlobStore, Destination};
use crate::sentiment::{Classification, SentimentAnalyzer};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Analyzer that returns a fixed label, or always fails, and counts calls.
#[derive(Debug)]
pub struct FakeAnalyzer {
    outcome: Result<SentimentLabel, String>,
    calls: AtomicUsize,
}

impl FakeAnalyzer {
    pub fn always(label: SentimentLabel) -> Self {
        Self {
            outcome: Ok(label),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SentimentAnalyzer for FakeAnalyzer {
    async fn detect(&self, _text: &str) -> Result<Classification, SentimentServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(label) => {
                let name = match label {
                    SentimentLabel::Positive => "Positive",
                    SentimentLabel::Negative => "Negative",
                    SentimentLabel::Neutral => "Neutral",
                    SentimentLabel::Mixed => "Mixed",
                };
                Ok(Classification {
                    label: *label,
                    scores: SentimentScores::from([(name.to_string(), 1.0)]),
                })
            }
            Err(message) => Err(SentimentServiceError::Service(message.clone())),
        }
    }
}

/// In-memory [`BlobStore`] keyed by destination.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<Destination, (String, String)>>,
    puts: AtomicUsize,
    fail_with: Option<String>,
}

impl MemoryStore {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Body and content type currently stored at `destination`.
    pub fn object(&self, destination: &Destination) -> Option<(String, String)> {
        self.objects.lock().unwrap().get(destination).cloned()
    }

    /// Number of attempted uploads.
    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

impl BlobStore for MemoryStore {
    async fn put_object(
        &self,
        destination: &Destination,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_with {
            return Err(StorageError::Upload {
                bucket: destination.bucket.clone(),
                key: destination.key.clone(),
                message: message.clone(),
            });
        }
        let body = String::from_utf8(body).expect("utf-8 body");
        self.objects
            .lock()
            .unwrap()
            .insert(destination.clone(), (body, content_type.to_string()));
        Ok(())
    }
}

/// A successful search envelope with `count` results for `day`.
pub fn guardian_ok_body(day: &str, count: usize) -> Value {
    let results: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "id": format!("{day}/story-{i}"),
                "type": "article",
                "webTitle": format!("Story {i} on {day}"),
                "webUrl": format!("https://www.theguardian.com/{day}/story-{i}"),
                "webPublicationDate": format!("{day}T09:00:00Z"),
                "fields": { "trailText": format!("Summary {i}") }
            })
        })
        .collect();

    json!({
        "response": {
            "status": "ok",
            "userTier": "developer",
            "total": count,
            "pageSize": count,
            "results": results
        }
    })
}
