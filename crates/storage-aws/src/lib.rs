//! AWS SDK implementations of the ccget client traits.
//!
//! This crate is the only place the AWS SDK appears: `AwsStorageClient`
//! implements `ccget_storage::StorageClient` over S3, `AwsBatchClient`
//! implements `ccget_batch::BatchClient` over S3 Batch Operations, and the
//! identity/role helpers cover STS and IAM.

mod batch;
mod client;
mod identity;
mod roles;

use aws_config::{BehaviorVersion, Region, SdkConfig};

use ccget_common::AWS_REGION;

pub use batch::AwsBatchClient;
pub use client::AwsStorageClient;
pub use identity::{account_id, role_arn};
pub use roles::ensure_batch_role;

/// Load SDK configuration pinned to the designated region using the default
/// credential chain.
pub async fn load_config() -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(AWS_REGION))
        .load()
        .await
}
