//! `ccget create-role` - provision the batch execution role.

use anyhow::Result;
use clap::Args;

use ccget_storage_aws::{account_id, ensure_batch_role, load_config};

#[derive(Args, Debug)]
pub struct CreateRoleArgs {
    /// Role name to create or reuse
    #[arg(short = 'n', long)]
    role_name: String,

    /// Destination bucket the role's policies are scoped to
    #[arg(short, long)]
    bucket: String,
}

pub async fn run(args: CreateRoleArgs) -> Result<()> {
    let config = load_config().await;
    let iam = aws_sdk_iam::Client::new(&config);
    let sts = aws_sdk_sts::Client::new(&config);

    let account: String = account_id(&sts).await?;
    let role_arn: String = ensure_batch_role(&iam, &account, &args.role_name, &args.bucket).await?;

    println!("Role ARN: {}", role_arn);
    Ok(())
}
