//! `ccget replicate` - mirror shard path listings.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Args;

use ccget_catalog::{news_periods, NewsPeriod, NEWS_FAMILY_ID};
use ccget_storage::{
    fetch_warc_paths, fetch_warc_paths_bulk, replicate_warc_paths, replicate_warc_paths_bulk,
};
use ccget_storage_aws::{load_config, AwsStorageClient};

#[derive(Args, Debug)]
pub struct ReplicateArgs {
    /// Shards to replicate (CC-NEWS expands to every published period)
    #[arg(short, long, num_args = 1.., required = true)]
    shards: Vec<String>,

    /// Local location to download listings after replication
    #[arg(short, long)]
    cache_dir: Option<PathBuf>,

    /// Destination bucket for replication
    #[arg(short, long)]
    bucket: String,

    /// Overwrite existing listings on S3 and in the local cache
    #[arg(long)]
    ignore_cache: bool,
}

pub async fn run(args: ReplicateArgs) -> Result<()> {
    let config = load_config().await;
    let storage = AwsStorageClient::new(&config);

    for shard_id in &args.shards {
        if shard_id == NEWS_FAMILY_ID {
            process_news_family(&storage, &args).await?;
        } else {
            process_shard(&storage, shard_id, &args).await?;
        }
    }

    Ok(())
}

async fn process_shard(
    storage: &AwsStorageClient,
    shard_id: &str,
    args: &ReplicateArgs,
) -> Result<()> {
    // First check if already replicated and copy if not
    replicate_warc_paths(storage, shard_id, &args.bucket, args.ignore_cache).await?;

    // We only download if a local cache dir is specified
    if let Some(cache_dir) = &args.cache_dir {
        fetch_warc_paths(storage, shard_id, cache_dir, &args.bucket, args.ignore_cache).await?;
    }

    Ok(())
}

async fn process_news_family(storage: &AwsStorageClient, args: &ReplicateArgs) -> Result<()> {
    let period_ids: Vec<String> = news_periods(Utc::now())
        .iter()
        .map(NewsPeriod::shard_id)
        .collect();

    replicate_warc_paths_bulk(storage, &period_ids, &args.bucket, args.ignore_cache).await?;

    if let Some(cache_dir) = &args.cache_dir {
        fetch_warc_paths_bulk(
            storage,
            &period_ids,
            cache_dir,
            &args.bucket,
            args.ignore_cache,
        )
        .await?;
    }

    Ok(())
}
