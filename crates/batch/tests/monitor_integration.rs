//! Integration tests for the job monitor and async preflight checks.
//!
//! These tests use mock clients to verify polling and validation logic
//! without requiring actual AWS access.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use ccget_batch::{
    policy, poll_once, BatchClient, BatchError, CopyJobSpec, JobProgress, ManifestSource,
    PreflightError, RestoreJobSpec,
};
use ccget_storage::{ObjectMetadata, StorageClient, StorageError};

/// Mock batch client that replays a scripted sequence of progress snapshots.
struct ScriptedBatchClient {
    snapshots: Mutex<VecDeque<JobProgress>>,
}

impl ScriptedBatchClient {
    fn new(snapshots: Vec<JobProgress>) -> Self {
        Self {
            snapshots: Mutex::new(snapshots.into()),
        }
    }
}

#[async_trait]
impl BatchClient for ScriptedBatchClient {
    async fn create_copy_job(&self, _spec: &CopyJobSpec) -> Result<String, BatchError> {
        Ok("job-copy".to_string())
    }

    async fn create_restore_job(&self, _spec: &RestoreJobSpec) -> Result<String, BatchError> {
        Ok("job-restore".to_string())
    }

    async fn describe_job(
        &self,
        _account_id: &str,
        _job_id: &str,
    ) -> Result<JobProgress, BatchError> {
        self.snapshots
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| BatchError::Remote {
                message: "no more snapshots".to_string(),
            })
    }
}

/// Mock storage client with a fixed bucket location and one known object.
struct FixedStorageClient {
    location: Option<String>,
    object: Option<(String, String, ObjectMetadata)>,
}

#[async_trait]
impl StorageClient for FixedStorageClient {
    async fn head_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Option<ObjectMetadata>, StorageError> {
        Ok(self.object.as_ref().and_then(|(b, k, metadata)| {
            if b == bucket && k == key {
                Some(metadata.clone())
            } else {
                None
            }
        }))
    }

    async fn put_object_from_file(
        &self,
        _bucket: &str,
        _key: &str,
        _file_path: &Path,
    ) -> Result<(), StorageError> {
        unimplemented!("not used by these tests")
    }

    async fn get_object_to_file(
        &self,
        _bucket: &str,
        _key: &str,
        _file_path: &Path,
    ) -> Result<(), StorageError> {
        unimplemented!("not used by these tests")
    }

    async fn copy_object(
        &self,
        _source_bucket: &str,
        _source_key: &str,
        _dest_bucket: &str,
        _dest_key: &str,
    ) -> Result<(), StorageError> {
        unimplemented!("not used by these tests")
    }

    async fn get_bucket_location(&self, _bucket: &str) -> Result<Option<String>, StorageError> {
        Ok(self.location.clone())
    }
}

fn snapshot(status: &str, succeeded: u64, failed: u64, total: u64) -> JobProgress {
    JobProgress {
        status: status.to_string(),
        succeeded,
        failed,
        total,
    }
}

#[tokio::test]
async fn test_poll_once_terminal_exactly_on_first_non_active_snapshot() {
    let client = ScriptedBatchClient::new(vec![
        snapshot("Active", 0, 0, 100),
        snapshot("Active", 40, 2, 100),
        snapshot("Active", 98, 2, 100),
        snapshot("Complete", 98, 2, 100),
    ]);

    assert!(!poll_once(&client, "123456789012", "job-1").await.unwrap());
    assert!(!poll_once(&client, "123456789012", "job-1").await.unwrap());
    assert!(!poll_once(&client, "123456789012", "job-1").await.unwrap());
    assert!(poll_once(&client, "123456789012", "job-1").await.unwrap());
}

#[tokio::test]
async fn test_poll_once_propagates_describe_failure() {
    let client = ScriptedBatchClient::new(Vec::new());

    let result = poll_once(&client, "123456789012", "job-1").await;
    assert!(matches!(result, Err(BatchError::Remote { .. })));
}

#[tokio::test]
async fn test_verify_bucket_region_accepts_default_region_sentinel() {
    let client = FixedStorageClient {
        location: None,
        object: None,
    };

    assert!(policy::verify_bucket_region(&client, "dest-bucket")
        .await
        .is_ok());
}

#[tokio::test]
async fn test_verify_bucket_region_rejects_other_regions() {
    let client = FixedStorageClient {
        location: Some("us-west-2".to_string()),
        object: None,
    };

    let result = policy::verify_bucket_region(&client, "dest-bucket").await;
    assert!(matches!(
        result,
        Err(BatchError::Preflight(PreflightError::Configuration { .. }))
    ));
}

#[tokio::test]
async fn test_manifest_source_resolve_pins_etag() {
    let client = FixedStorageClient {
        location: None,
        object: Some((
            "dest-bucket".to_string(),
            "m/manifest-abcdefgh.csv".to_string(),
            ObjectMetadata {
                size: 42,
                etag: Some("\"d41d8cd9\"".to_string()),
            },
        )),
    };

    let manifest: ManifestSource =
        ManifestSource::resolve(&client, "dest-bucket", "m/manifest-abcdefgh.csv")
            .await
            .unwrap();

    assert_eq!(manifest.etag, "\"d41d8cd9\"");
    assert_eq!(
        manifest.object_arn(),
        "arn:aws:s3:::dest-bucket/m/manifest-abcdefgh.csv"
    );
}

#[tokio::test]
async fn test_manifest_source_resolve_fails_when_missing() {
    let client = FixedStorageClient {
        location: None,
        object: None,
    };

    let result = ManifestSource::resolve(&client, "dest-bucket", "m/manifest-missing.csv").await;
    assert!(matches!(result, Err(BatchError::ManifestMissing { .. })));
}
