//! Batch job orchestration for ccget.
//!
//! This crate models provider batch jobs (bulk copy and bulk restore) without
//! depending on any SDK: descriptors, the [`BatchClient`] trait, preflight
//! policy checks, the restore cost estimate, and the polling monitor. The AWS
//! implementation of [`BatchClient`] lives in `ccget-storage-aws`.

pub mod cost;
mod error;
pub mod monitor;
pub mod policy;
mod traits;
mod types;

pub use cost::estimate_restore_cost;
pub use error::{BatchError, PreflightError};
pub use monitor::{poll_once, watch_job, JobProgress, DEFAULT_POLL_INTERVAL};
pub use traits::BatchClient;
pub use types::{
    bucket_arn, object_arn, CopyJobSpec, ManifestSource, ReportConfig, RestoreJobSpec,
    StorageClass,
};
