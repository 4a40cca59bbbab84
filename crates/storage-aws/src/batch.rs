//! AWS S3 Batch Operations implementation of the batch client.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3control::types::{
    JobManifest, JobManifestFieldName, JobManifestFormat, JobManifestLocation, JobManifestSpec,
    JobOperation, JobReport, JobReportFormat, JobReportScope, S3CannedAccessControlList,
    S3CopyObjectOperation, S3GlacierJobTier, S3InitiateRestoreObjectOperation,
    S3MetadataDirective, S3StorageClass,
};
use aws_sdk_s3control::Client as S3ControlClient;

use ccget_batch::{
    bucket_arn, BatchClient, BatchError, CopyJobSpec, JobProgress, ManifestSource, ReportConfig,
    RestoreJobSpec, StorageClass,
};

/// BatchClient backed by the AWS S3 Batch Operations API.
pub struct AwsBatchClient {
    s3control: S3ControlClient,
}

impl AwsBatchClient {
    /// Create a client from loaded SDK configuration.
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            s3control: S3ControlClient::new(config),
        }
    }

    /// Wrap an existing S3 Control client.
    pub fn from_client(s3control: S3ControlClient) -> Self {
        Self { s3control }
    }
}

fn invalid_spec<E: std::fmt::Display>(err: E) -> BatchError {
    BatchError::InvalidSpec {
        message: err.to_string(),
    }
}

fn to_sdk_storage_class(class: StorageClass) -> S3StorageClass {
    match class {
        StorageClass::Standard => S3StorageClass::Standard,
        StorageClass::StandardIa => S3StorageClass::StandardIa,
        StorageClass::OnezoneIa => S3StorageClass::OnezoneIa,
        StorageClass::Glacier => S3StorageClass::Glacier,
        StorageClass::IntelligentTiering => S3StorageClass::IntelligentTiering,
        StorageClass::DeepArchive => S3StorageClass::DeepArchive,
        StorageClass::GlacierIr => S3StorageClass::GlacierIr,
    }
}

fn manifest_descriptor(manifest: &ManifestSource) -> Result<JobManifest, BatchError> {
    let spec: JobManifestSpec = JobManifestSpec::builder()
        .format(JobManifestFormat::S3BatchOperationsCsv20180820)
        .fields(JobManifestFieldName::Bucket)
        .fields(JobManifestFieldName::Key)
        .build()
        .map_err(invalid_spec)?;

    let location: JobManifestLocation = JobManifestLocation::builder()
        .object_arn(manifest.object_arn())
        .e_tag(&manifest.etag)
        .build()
        .map_err(invalid_spec)?;

    Ok(JobManifest::builder()
        .spec(spec)
        .location(location)
        .build())
}

fn report_descriptor(report: &ReportConfig) -> Result<JobReport, BatchError> {
    Ok(JobReport::builder()
        .bucket(bucket_arn(&report.bucket))
        .format(JobReportFormat::ReportCsv20180820)
        .enabled(true)
        .prefix(&report.prefix)
        .report_scope(JobReportScope::AllTasks)
        .build())
}

#[async_trait]
impl BatchClient for AwsBatchClient {
    async fn create_copy_job(&self, spec: &CopyJobSpec) -> Result<String, BatchError> {
        let operation: JobOperation = JobOperation::builder()
            .s3_put_object_copy(
                S3CopyObjectOperation::builder()
                    .target_resource(bucket_arn(&spec.target_bucket))
                    .canned_access_control_list(S3CannedAccessControlList::Private)
                    .storage_class(to_sdk_storage_class(spec.storage_class))
                    .metadata_directive(S3MetadataDirective::Replace)
                    .requester_pays(false)
                    .build(),
            )
            .build();

        let mut request = self
            .s3control
            .create_job()
            .account_id(&spec.account_id)
            .confirmation_required(true)
            .operation(operation)
            .report(report_descriptor(&spec.report)?)
            .client_request_token(&spec.manifest.key)
            .manifest(manifest_descriptor(&spec.manifest)?)
            .priority(CopyJobSpec::PRIORITY)
            .role_arn(&spec.role_arn);
        if let Some(ref description) = spec.description {
            request = request.description(description);
        }

        let response = request.send().await.map_err(|err| BatchError::Remote {
            message: err.to_string(),
        })?;

        response
            .job_id()
            .map(|id| id.to_string())
            .ok_or_else(|| BatchError::Remote {
                message: "Create job response carried no job id".to_string(),
            })
    }

    async fn create_restore_job(&self, spec: &RestoreJobSpec) -> Result<String, BatchError> {
        let operation: JobOperation = JobOperation::builder()
            .s3_initiate_restore_object(
                S3InitiateRestoreObjectOperation::builder()
                    .expiration_in_days(spec.restore_days)
                    .glacier_job_tier(S3GlacierJobTier::Bulk)
                    .build(),
            )
            .build();

        let mut request = self
            .s3control
            .create_job()
            .account_id(&spec.account_id)
            .confirmation_required(true)
            .operation(operation)
            .report(report_descriptor(&spec.report)?)
            .client_request_token(&spec.manifest.key)
            .manifest(manifest_descriptor(&spec.manifest)?)
            .priority(RestoreJobSpec::PRIORITY)
            .role_arn(&spec.role_arn);
        if let Some(ref description) = spec.description {
            request = request.description(description);
        }

        let response = request.send().await.map_err(|err| BatchError::Remote {
            message: err.to_string(),
        })?;

        response
            .job_id()
            .map(|id| id.to_string())
            .ok_or_else(|| BatchError::Remote {
                message: "Create job response carried no job id".to_string(),
            })
    }

    async fn describe_job(
        &self,
        account_id: &str,
        job_id: &str,
    ) -> Result<JobProgress, BatchError> {
        let response = self
            .s3control
            .describe_job()
            .account_id(account_id)
            .job_id(job_id)
            .send()
            .await
            .map_err(|err| BatchError::Remote {
                message: err.to_string(),
            })?;

        let job = response.job().ok_or_else(|| BatchError::Remote {
            message: format!("No job description returned for {}", job_id),
        })?;
        let summary = job.progress_summary();

        Ok(JobProgress {
            status: job
                .status()
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            succeeded: summary
                .and_then(|s| s.number_of_tasks_succeeded())
                .unwrap_or(0) as u64,
            failed: summary
                .and_then(|s| s.number_of_tasks_failed())
                .unwrap_or(0) as u64,
            total: summary
                .and_then(|s| s.total_number_of_tasks())
                .unwrap_or(0) as u64,
        })
    }
}
