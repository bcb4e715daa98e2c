//! AWS Lambda entry point with feature-gated implementation.
//!
//! When the `lambda` feature is enabled and the process was started by the
//! Lambda runtime, each event payload is handled as one run and the
//! `{statusCode, body}` envelope is returned to the runtime. The clients in the
//! [`Pipeline`] are built once at cold start and reused for every invocation.
//!
//! When the feature is disabled, [`runtime_detected`] always returns `false`
//! so `main` can call into this module without `#[cfg]` directives.
//!
//! # Feature Flag
//!
//! Enable with: `cargo build --release --features lambda`

use crate::handler::Pipeline;
use crate::outputs::s3::BlobStore;
use crate::sentiment::SentimentAnalyzer;
use std::error::Error;

/// Environment variable the Lambda runtime sets for its API endpoint.
#[cfg(feature = "lambda")]
pub const RUNTIME_API_VAR: &str = "AWS_LAMBDA_RUNTIME_API";

/// Whether the process is running under the Lambda runtime.
#[cfg(feature = "lambda")]
pub fn runtime_detected() -> bool {
    std::env::var_os(RUNTIME_API_VAR).is_some()
}

/// Whether the process is running under the Lambda runtime (always `false`
/// when the `lambda` feature is disabled).
#[cfg(not(feature = "lambda"))]
pub fn runtime_detected() -> bool {
    false
}

/// Serve invocations until the runtime shuts the process down.
///
/// A [`crate::error::StorageError`] fails that invocation; the runtime reports
/// it to the caller and the process keeps serving.
#[cfg(feature = "lambda")]
pub async fn serve<A, B>(pipeline: &Pipeline<A, B>) -> Result<(), Box<dyn Error>>
where
    A: SentimentAnalyzer,
    B: BlobStore,
{
    use chrono::Utc;
    use lambda_runtime::{LambdaEvent, service_fn};
    use serde_json::Value;
    use tracing::info;

    info!("Serving Lambda invocations");
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        info!(request_id = %event.context.request_id, "Handling invocation");
        let today = Utc::now().date_naive();
        pipeline
            .handle_event(event.payload, today)
            .await
            .map_err(lambda_runtime::Error::from)
    }))
    .await
    .map_err(|e| -> Box<dyn Error> { e })
}

/// Serve invocations (unavailable when the `lambda` feature is disabled).
#[cfg(not(feature = "lambda"))]
pub async fn serve<A, B>(_pipeline: &Pipeline<A, B>) -> Result<(), Box<dyn Error>>
where
    A: SentimentAnalyzer,
    B: BlobStore,
{
    Err("built without the `lambda` feature".into())
}
