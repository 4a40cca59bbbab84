//! Error types for batch job orchestration and preflight checks.

use thiserror::Error;

use ccget_storage::StorageError;

/// Validation failures raised before any mutating remote call.
#[derive(Debug, Error, Clone)]
pub enum PreflightError {
    /// Conflicting or missing arguments.
    #[error("{message}")]
    Usage { message: String },

    /// Environment misconfiguration, e.g. a bucket outside the designated
    /// region.
    #[error("{message}")]
    Configuration { message: String },

    /// A cost-safety guard tripped and was not overridden.
    #[error("{message}")]
    Policy { message: String },

    /// The requested shard is not known to the catalog.
    #[error("Unknown shard: {shard}")]
    UnknownShard { shard: String },
}

/// Errors from batch job submission and monitoring.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The remote batch API rejected or failed a call.
    #[error("Batch operation failed: {message}")]
    Remote { message: String },

    /// A job descriptor could not be assembled.
    #[error("Invalid job descriptor: {message}")]
    InvalidSpec { message: String },

    /// The manifest a job should bind to does not exist.
    #[error("Manifest s3://{bucket}/{key} is missing")]
    ManifestMissing { bucket: String, key: String },

    /// Storage-layer failure while preparing a submission.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A preflight check failed.
    #[error(transparent)]
    Preflight(#[from] PreflightError),
}
