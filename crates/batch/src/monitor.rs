//! Polling monitor for submitted batch jobs.
//!
//! The monitor only reads: the submitted job is independent remote state that
//! keeps running whether or not anything is watching it, so the poll loop is
//! safe to interrupt at any iteration.

use std::time::Duration;

use log::info;

use crate::error::BatchError;
use crate::traits::BatchClient;

/// Default delay between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Status string the provider reports while a job is running.
pub const ACTIVE_STATUS: &str = "Active";

/// Snapshot of a job's status and progress counters.
#[derive(Debug, Clone)]
pub struct JobProgress {
    /// Provider status string, e.g. "Active", "Complete", "Suspended".
    pub status: String,
    /// Tasks finished successfully.
    pub succeeded: u64,
    /// Tasks that failed.
    pub failed: u64,
    /// Total tasks in the job.
    pub total: u64,
}

impl JobProgress {
    /// Percent of tasks finished, successfully or not.
    /// Zero while the provider has not counted tasks yet.
    pub fn percent_complete(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.succeeded + self.failed) as f64 / self.total as f64 * 100.0
    }

    /// A job is terminal once the provider stops reporting it as active.
    pub fn is_terminal(&self) -> bool {
        self.status != ACTIVE_STATUS
    }
}

/// Poll a job once, logging a status line.
///
/// Returns true when the job is no longer active.
pub async fn poll_once<C: BatchClient>(
    client: &C,
    account_id: &str,
    job_id: &str,
) -> Result<bool, BatchError> {
    let progress: JobProgress = client.describe_job(account_id, job_id).await?;

    info!(
        "Total: {}; Succeeded: {}; Failed: {}; Progress%: {:.2} Status: {}",
        progress.total,
        progress.succeeded,
        progress.failed,
        progress.percent_complete(),
        progress.status
    );

    Ok(progress.is_terminal())
}

/// Poll until the job leaves the active state.
pub async fn watch_job<C: BatchClient>(
    client: &C,
    account_id: &str,
    job_id: &str,
    interval: Duration,
) -> Result<(), BatchError> {
    while !poll_once(client, account_id, job_id).await? {
        tokio::time::sleep(interval).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(status: &str, succeeded: u64, failed: u64, total: u64) -> JobProgress {
        JobProgress {
            status: status.to_string(),
            succeeded,
            failed,
            total,
        }
    }

    #[test]
    fn test_percent_complete() {
        assert_eq!(progress("Active", 30, 20, 100).percent_complete(), 50.0);
        assert_eq!(progress("Complete", 100, 0, 100).percent_complete(), 100.0);
    }

    #[test]
    fn test_percent_complete_with_no_tasks_counted() {
        assert_eq!(progress("Active", 0, 0, 0).percent_complete(), 0.0);
    }

    #[test]
    fn test_terminality_follows_active_status() {
        assert!(!progress("Active", 0, 0, 10).is_terminal());
        assert!(progress("Complete", 10, 0, 10).is_terminal());
        assert!(progress("Suspended", 0, 0, 10).is_terminal());
        assert!(progress("Failed", 0, 10, 10).is_terminal());
    }
}
