//! `ccget restore` - submit a bulk restore job back to the standard tier.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ccget_batch::{
    estimate_restore_cost, monitor, policy, BatchClient, ManifestSource, ReportConfig,
    RestoreJobSpec,
};
use ccget_catalog::ShardInfo;
use ccget_common::{sample_keys, SAMPLE_SEED};
use ccget_storage::{create_job_manifest, read_manifest_file};
use ccget_storage_aws::{account_id, load_config, role_arn, AwsBatchClient, AwsStorageClient};

#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// The shard to restore
    #[arg(short, long)]
    shard: Option<String>,

    /// Number of ~1GB WARC files to restore (0 for all), sampled reproducibly
    #[arg(short)]
    n: usize,

    /// Local location of warc.paths.gz files
    #[arg(short, long)]
    cache_dir: Option<PathBuf>,

    /// Bucket holding the archived objects
    #[arg(short, long)]
    bucket: String,

    /// Key prefix in the bucket for batch job manifests
    #[arg(short, long, default_value = "batch-restore-manifests")]
    manifest_prefix: String,

    /// Use a local manifest file instead of generating one
    #[arg(short = 'o', long)]
    manifest_file: Option<PathBuf>,

    /// Key prefix in the bucket for batch job reports
    #[arg(short, long, default_value = "batch-restore-reports")]
    reports_prefix: String,

    /// Number of days to keep restored copies in the standard tier
    #[arg(short = 'd', long)]
    restore_days: u32,

    /// Role name for the batch job execution role
    #[arg(long)]
    role_name: String,

    /// Contact recorded in the job description
    #[arg(long)]
    contact: Option<String>,

    /// Poll job progress until it leaves the active state
    #[arg(long)]
    watch: bool,
}

pub async fn run(args: RestoreArgs) -> Result<()> {
    let config = load_config().await;
    let storage = AwsStorageClient::new(&config);
    let batch = AwsBatchClient::new(&config);
    let iam = aws_sdk_iam::Client::new(&config);
    let sts = aws_sdk_sts::Client::new(&config);

    // All validation happens before any mutating remote call.
    policy::verify_shard_or_manifest_file(args.shard.as_deref(), args.manifest_file.as_deref())?;
    if let Some(shard) = &args.shard {
        let known: Vec<ShardInfo> = super::catalog_shards_for(shard).await?;
        policy::verify_shard_exists(shard, args.cache_dir.as_deref(), &known)?;
    }

    let account: String = account_id(&sts).await?;
    let role: String = role_arn(&iam, &args.role_name).await?;

    let keys: Vec<String> = if let Some(manifest_file) = &args.manifest_file {
        read_manifest_file(manifest_file)?
    } else if let Some(shard) = &args.shard {
        let Some(cache_dir) = &args.cache_dir else {
            bail!("--cache-dir is required when restoring a shard");
        };
        super::load_shard_keys(shard, cache_dir)?
    } else {
        bail!("Specify either a shard OR a manifest file");
    };

    let mut sample_rng: StdRng = StdRng::seed_from_u64(SAMPLE_SEED);
    let keys: Vec<String> = sample_keys(&keys, args.n, &mut sample_rng);

    let cost_estimate: f64 = estimate_restore_cost(keys.len(), args.restore_days);
    println!(
        "This restore job is estimated to cost ${:.2}",
        cost_estimate
    );

    // Restore manifests reference the archive bucket itself.
    let mut suffix_rng: StdRng = StdRng::from_entropy();
    let manifest_key: String = create_job_manifest(
        &storage,
        &keys,
        &args.manifest_prefix,
        &args.bucket,
        &args.bucket,
        &mut suffix_rng,
    )
    .await?;
    println!("Created manifest: s3://{}/{}", args.bucket, manifest_key);

    let manifest: ManifestSource =
        ManifestSource::resolve(&storage, &args.bucket, &manifest_key).await?;
    let source: String = args
        .shard
        .clone()
        .or_else(|| {
            args.manifest_file
                .as_ref()
                .map(|f| f.display().to_string())
        })
        .unwrap_or_default();
    let spec = RestoreJobSpec {
        account_id: account.clone(),
        restore_days: args.restore_days as i32,
        manifest,
        report: ReportConfig {
            bucket: args.bucket.clone(),
            prefix: args.reports_prefix.clone(),
        },
        role_arn: role,
        description: super::job_description("Restore", &source, args.contact.as_deref()),
    };

    let job_id: String = batch.create_restore_job(&spec).await?;
    println!("Created batch restore job: {}", job_id);
    println!("Confirm and start the job from the S3 console.");

    if args.watch {
        println!("Polling job status (safe to CTRL-C this process; the job keeps running)...");
        monitor::watch_job(&batch, &account, &job_id, monitor::DEFAULT_POLL_INTERVAL).await?;
    }

    Ok(())
}
