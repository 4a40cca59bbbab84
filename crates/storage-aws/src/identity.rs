//! Caller identity and role resolution.

use aws_sdk_iam::Client as IamClient;
use aws_sdk_sts::Client as StsClient;

use ccget_batch::BatchError;

/// Resolve the caller's account id.
///
/// Resolved once per invocation and passed explicitly to everything that
/// needs it.
pub async fn account_id(sts: &StsClient) -> Result<String, BatchError> {
    let identity = sts
        .get_caller_identity()
        .send()
        .await
        .map_err(|err| BatchError::Remote {
            message: err.to_string(),
        })?;

    identity
        .account()
        .map(|a| a.to_string())
        .ok_or_else(|| BatchError::Remote {
            message: "Caller identity carried no account id".to_string(),
        })
}

/// Resolve a role name to its ARN.
pub async fn role_arn(iam: &IamClient, role_name: &str) -> Result<String, BatchError> {
    let response = iam
        .get_role()
        .role_name(role_name)
        .send()
        .await
        .map_err(|err| BatchError::Remote {
            message: err.to_string(),
        })?;

    response
        .role()
        .map(|role| role.arn().to_string())
        .ok_or_else(|| BatchError::Remote {
            message: format!("No role returned for {}", role_name),
        })
}
