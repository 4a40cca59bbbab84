//! `ccget job-status` - poll a submitted batch job.

use anyhow::Result;
use clap::Args;

use ccget_batch::monitor;
use ccget_storage_aws::{account_id, load_config, AwsBatchClient};

#[derive(Args, Debug)]
pub struct JobStatusArgs {
    /// Provider-issued job id
    #[arg(long)]
    job_id: String,

    /// Keep polling until the job leaves the active state
    #[arg(long)]
    watch: bool,
}

pub async fn run(args: JobStatusArgs) -> Result<()> {
    let config = load_config().await;
    let batch = AwsBatchClient::new(&config);
    let sts = aws_sdk_sts::Client::new(&config);

    let account: String = account_id(&sts).await?;

    if args.watch {
        println!("Polling job status (safe to CTRL-C this process; the job keeps running)...");
        monitor::watch_job(&batch, &account, &args.job_id, monitor::DEFAULT_POLL_INTERVAL).await?;
    } else {
        monitor::poll_once(&batch, &account, &args.job_id).await?;
    }

    Ok(())
}
