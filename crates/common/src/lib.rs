//! Shared types and utilities for ccget.
//!
//! This crate provides the pieces every other ccget crate leans on:
//! - Constants for the Common Crawl source bucket and designated region
//! - Path resolution for shard data objects on S3 and in the local cache
//! - A reader for gzip-compressed path listings
//! - Deterministic key sampling and manifest name suffixes

pub mod constants;
pub mod paths;
pub mod sampling;

// Re-export commonly used items at crate root
pub use constants::*;
pub use paths::{
    read_paths_file, source_url, warc_paths_local_path, warc_paths_s3_key, warc_paths_url,
    wet_paths_s3_key, PathsFileError,
};
pub use sampling::{manifest_suffix, sample_keys};
