//! Job descriptors shared by all batch backends.

use std::fmt;
use std::str::FromStr;

use ccget_storage::StorageClient;

use crate::error::BatchError;

/// S3 storage classes accepted for copy jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageClass {
    Standard,
    StandardIa,
    OnezoneIa,
    Glacier,
    IntelligentTiering,
    DeepArchive,
    GlacierIr,
}

impl StorageClass {
    /// All storage classes, in wire-name order.
    pub const ALL: [StorageClass; 7] = [
        StorageClass::Standard,
        StorageClass::StandardIa,
        StorageClass::OnezoneIa,
        StorageClass::Glacier,
        StorageClass::IntelligentTiering,
        StorageClass::DeepArchive,
        StorageClass::GlacierIr,
    ];

    /// Wire name used by the batch API and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageClass::Standard => "STANDARD",
            StorageClass::StandardIa => "STANDARD_IA",
            StorageClass::OnezoneIa => "ONEZONE_IA",
            StorageClass::Glacier => "GLACIER",
            StorageClass::IntelligentTiering => "INTELLIGENT_TIERING",
            StorageClass::DeepArchive => "DEEP_ARCHIVE",
            StorageClass::GlacierIr => "GLACIER_IR",
        }
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StorageClass::ALL
            .iter()
            .find(|class| class.as_str() == s)
            .copied()
            .ok_or_else(|| {
                let expected: Vec<&str> =
                    StorageClass::ALL.iter().map(StorageClass::as_str).collect();
                format!(
                    "Unknown storage class {} (expected one of: {})",
                    s,
                    expected.join(", ")
                )
            })
    }
}

/// ARN of an S3 bucket.
pub fn bucket_arn(bucket: &str) -> String {
    format!("arn:aws:s3:::{}", bucket)
}

/// ARN of an S3 object.
pub fn object_arn(bucket: &str, key: &str) -> String {
    format!("arn:aws:s3:::{}/{}", bucket, key)
}

/// The manifest object a job binds to.
///
/// The ETag pins the exact uploaded bytes: a submitted job can never silently
/// reference a manifest that was overwritten after submission was prepared.
#[derive(Debug, Clone)]
pub struct ManifestSource {
    /// Bucket holding the manifest.
    pub bucket: String,
    /// Full key of the manifest object.
    pub key: String,
    /// ETag of the manifest object at submission time.
    pub etag: String,
}

impl ManifestSource {
    /// Pin an uploaded manifest by its current ETag.
    ///
    /// # Arguments
    /// * `client` - Storage client for the HEAD probe
    /// * `bucket` - Bucket the manifest was uploaded to
    /// * `key` - Key returned by the manifest builder
    pub async fn resolve<C: StorageClient>(
        client: &C,
        bucket: &str,
        key: &str,
    ) -> Result<Self, BatchError> {
        let metadata = client
            .head_object(bucket, key)
            .await
            .map_err(BatchError::Storage)?
            .ok_or_else(|| BatchError::ManifestMissing {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })?;

        let etag: String = metadata.etag.ok_or_else(|| BatchError::InvalidSpec {
            message: format!("No ETag reported for s3://{}/{}", bucket, key),
        })?;

        Ok(Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
            etag,
        })
    }

    /// ARN of the manifest object.
    pub fn object_arn(&self) -> String {
        object_arn(&self.bucket, &self.key)
    }
}

/// Where the provider writes the per-task completion report.
///
/// Reports cover all tasks, not just failures, so successes are auditable.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Bucket the report is written to.
    pub bucket: String,
    /// Key prefix for report objects.
    pub prefix: String,
}

/// Parameters for a bulk server-side copy job.
///
/// The operation copies every manifest entry into `target_bucket` with the
/// requested storage class, replacing metadata, private ACL, requester-pays
/// off.
#[derive(Debug, Clone)]
pub struct CopyJobSpec {
    /// Account submitting the job.
    pub account_id: String,
    /// Bucket objects are copied into.
    pub target_bucket: String,
    /// Storage class for the copies.
    pub storage_class: StorageClass,
    /// Manifest the job acts on.
    pub manifest: ManifestSource,
    /// Completion report destination.
    pub report: ReportConfig,
    /// Execution role assumed by the batch service.
    pub role_arn: String,
    /// Free-form description shown in the console.
    pub description: Option<String>,
}

impl CopyJobSpec {
    /// Copy jobs are routine; restores outrank them.
    pub const PRIORITY: i32 = 1;
}

/// Parameters for a bulk restore-from-archive job.
///
/// Restores use the bulk retrieval tier: lowest cost, highest latency.
#[derive(Debug, Clone)]
pub struct RestoreJobSpec {
    /// Account submitting the job.
    pub account_id: String,
    /// Days the restored copies stay in the standard tier.
    pub restore_days: i32,
    /// Manifest the job acts on.
    pub manifest: ManifestSource,
    /// Completion report destination.
    pub report: ReportConfig,
    /// Execution role assumed by the batch service.
    pub role_arn: String,
    /// Free-form description shown in the console.
    pub description: Option<String>,
}

impl RestoreJobSpec {
    /// Restores gate someone actively waiting on data.
    pub const PRIORITY: i32 = 10;
}
