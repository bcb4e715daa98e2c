//! Blob store access.
//!
//! [`BlobStore`] is the seam the writer uploads through; [`S3Store`] is the
//! production implementation over `aws-sdk-s3`. Credentials come from the
//! default AWS provider chain of the hosting environment.

use crate::error::StorageError;
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use std::fmt;
use tracing::{debug, instrument};

pub const DEFAULT_BUCKET: &str = "guardianews";
pub const DEFAULT_KEY: &str = "guardian-news.json";

/// A fixed bucket/key pair the batch is written to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination {
    pub bucket: String,
    pub key: String,
}

impl Destination {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// Trait for an object store that can replace a whole object in one call.
pub trait BlobStore {
    /// Write `body` at `destination`, replacing any existing object.
    async fn put_object(
        &self,
        destination: &Destination,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;
}

/// [`BlobStore`] over Amazon S3.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS configuration (region and credentials).
    pub async fn from_env() -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self::new(aws_sdk_s3::Client::new(&config))
    }
}

impl BlobStore for S3Store {
    #[instrument(level = "info", skip_all, fields(%destination, bytes = body.len()))]
    async fn put_object(
        &self,
        destination: &Destination,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let output = self
            .client
            .put_object()
            .bucket(&destination.bucket)
            .key(&destination.key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                bucket: destination.bucket.clone(),
                key: destination.key.clone(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        debug!(etag = ?output.e_tag(), "S3 put_object completed");
        Ok(())
    }
}
