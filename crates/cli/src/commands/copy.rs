//! `ccget copy` - submit a bulk copy job for a shard.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ccget_batch::{
    monitor, policy, BatchClient, CopyJobSpec, ManifestSource, ReportConfig, StorageClass,
};
use ccget_catalog::{is_news_shard, ShardInfo};
use ccget_common::{sample_keys, CC_BUCKET, SAMPLE_SEED};
use ccget_storage::create_job_manifest;
use ccget_storage_aws::{account_id, load_config, role_arn, AwsBatchClient, AwsStorageClient};

#[derive(Args, Debug)]
pub struct CopyArgs {
    /// The shard to archive
    #[arg(short, long)]
    shard: String,

    /// Number of ~1GB WARC files to archive (0 for all), sampled reproducibly
    #[arg(short)]
    n: usize,

    /// Local location of warc.paths.gz files
    #[arg(short, long)]
    cache_dir: PathBuf,

    /// Destination bucket for the archive operation
    #[arg(short, long)]
    bucket: String,

    /// Key prefix in the destination bucket for batch job manifests
    #[arg(short, long, default_value = "batch-copy-manifests")]
    manifest_prefix: String,

    /// Key prefix in the destination bucket for batch job reports
    #[arg(short, long, default_value = "batch-copy-reports")]
    reports_prefix: String,

    /// Role name for the batch job execution role
    #[arg(long)]
    role_name: String,

    /// Storage class for copied objects
    #[arg(long)]
    storage_class: StorageClass,

    /// Bypass the storage-class volume guards
    #[arg(long)]
    ignore_checks: bool,

    /// Contact recorded in the job description
    #[arg(long)]
    contact: Option<String>,

    /// Poll job progress until it leaves the active state
    #[arg(long)]
    watch: bool,
}

pub async fn run(args: CopyArgs) -> Result<()> {
    let config = load_config().await;
    let storage = AwsStorageClient::new(&config);
    let batch = AwsBatchClient::new(&config);
    let iam = aws_sdk_iam::Client::new(&config);
    let sts = aws_sdk_sts::Client::new(&config);

    // All validation happens before any mutating remote call.
    policy::verify_bucket_region(&storage, &args.bucket).await?;
    // Monthly news listings are small; the volume guards only matter for full
    // crawls.
    let ignore_checks: bool = args.ignore_checks || is_news_shard(&args.shard);
    policy::verify_storage_class_for_volume(args.n, args.storage_class, ignore_checks)?;
    let known: Vec<ShardInfo> = super::catalog_shards_for(&args.shard).await?;
    policy::verify_shard_exists(&args.shard, Some(&args.cache_dir), &known)?;

    let account: String = account_id(&sts).await?;
    let role: String = role_arn(&iam, &args.role_name).await?;

    let keys: Vec<String> = super::load_shard_keys(&args.shard, &args.cache_dir)?;
    let mut sample_rng: StdRng = StdRng::seed_from_u64(SAMPLE_SEED);
    let keys: Vec<String> = sample_keys(&keys, args.n, &mut sample_rng);

    let mut suffix_rng: StdRng = StdRng::from_entropy();
    let manifest_key: String = create_job_manifest(
        &storage,
        &keys,
        &args.manifest_prefix,
        CC_BUCKET,
        &args.bucket,
        &mut suffix_rng,
    )
    .await?;
    println!("Created manifest: s3://{}/{}", args.bucket, manifest_key);

    let manifest: ManifestSource =
        ManifestSource::resolve(&storage, &args.bucket, &manifest_key).await?;
    let spec = CopyJobSpec {
        account_id: account.clone(),
        target_bucket: args.bucket.clone(),
        storage_class: args.storage_class,
        manifest,
        report: ReportConfig {
            bucket: args.bucket.clone(),
            prefix: args.reports_prefix.clone(),
        },
        role_arn: role,
        description: super::job_description("Copy", &args.shard, args.contact.as_deref()),
    };

    let job_id: String = batch.create_copy_job(&spec).await?;
    println!("Created batch copy job: {}", job_id);
    println!("Confirm and start the job from the S3 console.");

    if args.watch {
        println!("Polling job status (safe to CTRL-C this process; the job keeps running)...");
        monitor::watch_job(&batch, &account, &job_id, monitor::DEFAULT_POLL_INTERVAL).await?;
    }

    Ok(())
}
