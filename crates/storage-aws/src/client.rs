//! AWS SDK S3 implementation of the storage client.

use std::path::Path;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use ccget_storage::{ObjectMetadata, StorageClient, StorageError};

/// StorageClient backed by the AWS SDK for Rust.
pub struct AwsStorageClient {
    s3_client: S3Client,
}

impl AwsStorageClient {
    /// Create a client from loaded SDK configuration.
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            s3_client: S3Client::new(config),
        }
    }

    /// Wrap an existing S3 client.
    pub fn from_client(s3_client: S3Client) -> Self {
        Self { s3_client }
    }
}

#[async_trait]
impl StorageClient for AwsStorageClient {
    async fn head_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<Option<ObjectMetadata>, StorageError> {
        match self
            .s3_client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => Ok(Some(ObjectMetadata {
                size: output.content_length().map(|l| l as u64).unwrap_or(0),
                etag: output.e_tag().map(|s| s.to_string()),
            })),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(None)
                } else {
                    Err(StorageError::Remote {
                        message: service_err.to_string(),
                    })
                }
            }
        }
    }

    async fn put_object_from_file(
        &self,
        bucket: &str,
        key: &str,
        file_path: &Path,
    ) -> Result<(), StorageError> {
        let body = ByteStream::from_path(file_path)
            .await
            .map_err(|e| StorageError::Io {
                path: file_path.display().to_string(),
                message: e.to_string(),
            })?;

        self.s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|err| StorageError::Remote {
                message: err.to_string(),
            })?;

        Ok(())
    }

    async fn get_object_to_file(
        &self,
        bucket: &str,
        key: &str,
        file_path: &Path,
    ) -> Result<(), StorageError> {
        let response = self
            .s3_client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    StorageError::NotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    StorageError::Remote {
                        message: service_err.to_string(),
                    }
                }
            })?;

        if let Some(parent) = file_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::from_io(parent.display().to_string(), e))?;
        }

        let mut file = File::create(file_path)
            .await
            .map_err(|e| StorageError::from_io(file_path.display().to_string(), e))?;

        let mut body = response.body;
        while let Some(chunk) = body.try_next().await.map_err(|e| StorageError::Remote {
            message: e.to_string(),
        })? {
            file.write_all(&chunk)
                .await
                .map_err(|e| StorageError::from_io(file_path.display().to_string(), e))?;
        }

        file.flush()
            .await
            .map_err(|e| StorageError::from_io(file_path.display().to_string(), e))?;

        Ok(())
    }

    async fn copy_object(
        &self,
        source_bucket: &str,
        source_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<(), StorageError> {
        let copy_source: String = format!("{}/{}", source_bucket, source_key);

        self.s3_client
            .copy_object()
            .copy_source(copy_source)
            .bucket(dest_bucket)
            .key(dest_key)
            .send()
            .await
            .map_err(|err| StorageError::Remote {
                message: err.to_string(),
            })?;

        Ok(())
    }

    async fn get_bucket_location(&self, bucket: &str) -> Result<Option<String>, StorageError> {
        let output = self
            .s3_client
            .get_bucket_location()
            .bucket(bucket)
            .send()
            .await
            .map_err(|err| StorageError::Remote {
                message: err.to_string(),
            })?;

        // us-east-1 reports no constraint (or an empty one)
        Ok(output
            .location_constraint()
            .map(|c| c.as_str().to_string())
            .filter(|s| !s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aws_client_implements_storage_client() {
        fn assert_storage_client<T: StorageClient>() {}
        assert_storage_client::<AwsStorageClient>();
    }
}
