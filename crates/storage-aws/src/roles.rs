//! Provisioning of the batch-operations execution role.
//!
//! The attached policies deliberately omit object-versioning permissions:
//! this tool bulk archives data at minimum cost, and versioned copies would
//! defeat that. Existing roles and policies are reused rather than recreated.

use aws_sdk_iam::Client as IamClient;
use serde_json::json;

use ccget_batch::BatchError;

const PUT_OBJECTS_POLICY_NAME: &str = "S3BatchOpsPutObjects_CCGET";
const RESTORE_OBJECTS_POLICY_NAME: &str = "S3BatchOpsRestoreObjects_CCGET";

fn assume_role_document() -> String {
    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Effect": "Allow",
            "Principal": {"Service": "batchoperations.s3.amazonaws.com"},
            "Action": "sts:AssumeRole",
        }]
    })
    .to_string()
}

fn put_objects_policy_document(dest_bucket: &str) -> String {
    json!({
        "Version": "2012-10-17",
        "Statement": [
            {
                "Effect": "Allow",
                "Action": ["s3:PutObject", "s3:PutObjectAcl", "s3:PutObjectTagging"],
                "Resource": format!("arn:aws:s3:::{}/*", dest_bucket),
            },
            {
                "Effect": "Allow",
                "Action": ["s3:GetObject"],
                "Resource": format!("arn:aws:s3:::{}/*", dest_bucket),
            },
        ]
    })
    .to_string()
}

fn restore_objects_policy_document(dest_bucket: &str) -> String {
    json!({
        "Version": "2012-10-17",
        "Statement": [
            {
                "Effect": "Allow",
                "Action": ["s3:RestoreObject"],
                "Resource": format!("arn:aws:s3:::{}/*", dest_bucket),
            },
            {
                "Effect": "Allow",
                "Action": ["s3:GetObject", "s3:PutObject"],
                "Resource": format!("arn:aws:s3:::{}/*", dest_bucket),
            },
        ]
    })
    .to_string()
}

fn remote_err<E: std::fmt::Display>(err: E) -> BatchError {
    BatchError::Remote {
        message: err.to_string(),
    }
}

async fn get_or_create_policy(
    iam: &IamClient,
    account_id: &str,
    policy_name: &str,
    document: String,
) -> Result<String, BatchError> {
    let policy_arn: String = format!("arn:aws:iam::{}:policy/{}", account_id, policy_name);

    match iam.get_policy().policy_arn(&policy_arn).send().await {
        Ok(response) => Ok(response
            .policy()
            .and_then(|p| p.arn())
            .map(str::to_string)
            .unwrap_or(policy_arn)),
        Err(err) => {
            let service_err = err.into_service_error();
            if !service_err.is_no_such_entity_exception() {
                return Err(remote_err(service_err));
            }

            let created = iam
                .create_policy()
                .policy_name(policy_name)
                .policy_document(document)
                .send()
                .await
                .map_err(remote_err)?;

            created
                .policy()
                .and_then(|p| p.arn())
                .map(str::to_string)
                .ok_or_else(|| BatchError::Remote {
                    message: format!("Created policy {} carried no ARN", policy_name),
                })
        }
    }
}

async fn get_or_create_role(iam: &IamClient, role_name: &str) -> Result<String, BatchError> {
    match iam.get_role().role_name(role_name).send().await {
        Ok(response) => response
            .role()
            .map(|role| role.arn().to_string())
            .ok_or_else(|| BatchError::Remote {
                message: format!("No role returned for {}", role_name),
            }),
        Err(err) => {
            let service_err = err.into_service_error();
            if !service_err.is_no_such_entity_exception() {
                return Err(remote_err(service_err));
            }

            let created = iam
                .create_role()
                .role_name(role_name)
                .assume_role_policy_document(assume_role_document())
                .send()
                .await
                .map_err(remote_err)?;

            created
                .role()
                .map(|role| role.arn().to_string())
                .ok_or_else(|| BatchError::Remote {
                    message: format!("Created role {} carried no ARN", role_name),
                })
        }
    }
}

/// Get-or-create the batch execution role and attach its policies.
///
/// Creates the put-objects and restore-objects managed policies scoped to
/// `dest_bucket` (reusing them when present), then the role trusted by the
/// batch-operations service, and attaches both policies. Returns the role
/// ARN.
pub async fn ensure_batch_role(
    iam: &IamClient,
    account_id: &str,
    role_name: &str,
    dest_bucket: &str,
) -> Result<String, BatchError> {
    let put_policy_arn: String = get_or_create_policy(
        iam,
        account_id,
        PUT_OBJECTS_POLICY_NAME,
        put_objects_policy_document(dest_bucket),
    )
    .await?;

    let restore_policy_arn: String = get_or_create_policy(
        iam,
        account_id,
        RESTORE_OBJECTS_POLICY_NAME,
        restore_objects_policy_document(dest_bucket),
    )
    .await?;

    let role_arn: String = get_or_create_role(iam, role_name).await?;

    iam.attach_role_policy()
        .role_name(role_name)
        .policy_arn(&put_policy_arn)
        .send()
        .await
        .map_err(remote_err)?;

    iam.attach_role_policy()
        .role_name(role_name)
        .policy_arn(&restore_policy_arn)
        .send()
        .await
        .map_err(remote_err)?;

    Ok(role_arn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_documents_scope_to_bucket() {
        let document: String = put_objects_policy_document("dest-bucket");
        assert!(document.contains("arn:aws:s3:::dest-bucket/*"));
        assert!(document.contains("s3:PutObject"));
        assert!(!document.contains("s3:RestoreObject"));

        let document: String = restore_objects_policy_document("dest-bucket");
        assert!(document.contains("s3:RestoreObject"));
    }

    #[test]
    fn test_assume_role_document_trusts_batch_service() {
        let document: String = assume_role_document();
        assert!(document.contains("batchoperations.s3.amazonaws.com"));
        assert!(document.contains("sts:AssumeRole"));
    }
}
