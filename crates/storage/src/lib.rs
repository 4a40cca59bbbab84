//! Storage abstraction for ccget S3 operations.
//!
//! This crate provides a backend-agnostic interface for the object-store
//! operations ccget needs, plus the orchestration built on top of it:
//!
//! - **Manifest builder** - stages a batch job manifest CSV in a scoped
//!   temporary directory and uploads it to the destination bucket
//! - **Replication cache** - copies shard path listings from the throttled
//!   Common Crawl bucket to an intermediary bucket and mirrors them to a
//!   local cache directory, skipping work that is already done
//!
//! The AWS SDK implementation of [`StorageClient`] lives in the
//! `ccget-storage-aws` crate; tests use in-memory mocks.

mod error;
pub mod manifest;
pub mod replicate;
mod traits;

pub use error::StorageError;
pub use manifest::{create_job_manifest, read_manifest_file};
pub use replicate::{
    fetch_warc_paths, fetch_warc_paths_bulk, is_replicated, replicate_warc_paths,
    replicate_warc_paths_bulk, FetchOutcome, ReplicateOutcome,
};
pub use traits::{ObjectMetadata, StorageClient};
