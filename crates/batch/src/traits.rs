//! Batch client trait implemented by each backend.

use async_trait::async_trait;

use crate::error::BatchError;
use crate::monitor::JobProgress;
use crate::types::{CopyJobSpec, RestoreJobSpec};

/// Provider batch-operations API.
///
/// Jobs are created requiring confirmation: submission returns an id, but the
/// operator must start the job from the provider console. This is the safety
/// brake against accidental bulk operations.
#[async_trait]
pub trait BatchClient: Send + Sync {
    /// Submit a copy job. Returns the provider-issued job id.
    async fn create_copy_job(&self, spec: &CopyJobSpec) -> Result<String, BatchError>;

    /// Submit a restore job. Returns the provider-issued job id.
    async fn create_restore_job(&self, spec: &RestoreJobSpec) -> Result<String, BatchError>;

    /// Fetch current status and progress counters for a job.
    async fn describe_job(&self, account_id: &str, job_id: &str)
        -> Result<JobProgress, BatchError>;
}
