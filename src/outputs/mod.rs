//! Output generation: serialize the batch and upload it to the blob store.
//!
//! # Submodules
//!
//! - [`json`]: Renders articles as newline-delimited JSON and writes the batch
//! - [`s3`]: The [`s3::BlobStore`] seam and its S3 implementation
//!
//! # Output Layout
//!
//! ```text
//! s3://guardianews/
//! └── guardian-news.json   # one article per line, replaced on every run
//! ```

pub mod json;
pub mod s3;
