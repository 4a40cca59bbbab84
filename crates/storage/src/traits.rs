//! Storage client trait for S3 operations.

use std::path::Path;

use async_trait::async_trait;

use crate::error::StorageError;

/// Metadata for an object returned by a HEAD probe.
#[derive(Debug, Clone)]
pub struct ObjectMetadata {
    /// Object size in bytes.
    pub size: u64,
    /// ETag of the stored object.
    pub etag: Option<String>,
}

/// Low-level object store operations, implemented by each backend.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Probe an object. Returns None if it does not exist.
    async fn head_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Option<ObjectMetadata>, StorageError>;

    /// Upload a local file to S3.
    async fn put_object_from_file(
        &self,
        bucket: &str,
        key: &str,
        file_path: &Path,
    ) -> Result<(), StorageError>;

    /// Download an object to a local file, creating parent directories.
    async fn get_object_to_file(
        &self,
        bucket: &str,
        key: &str,
        file_path: &Path,
    ) -> Result<(), StorageError>;

    /// Server-side copy between buckets.
    async fn copy_object(
        &self,
        source_bucket: &str,
        source_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<(), StorageError>;

    /// Bucket location constraint. None means the default region (us-east-1),
    /// which reports no constraint.
    async fn get_bucket_location(&self, bucket: &str) -> Result<Option<String>, StorageError>;
}
