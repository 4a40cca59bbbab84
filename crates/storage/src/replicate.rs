//! Replication cache for shard path listings.
//!
//! `warc.paths.gz` listings are small (under 200 KB) and name every WARC file
//! in a shard. They are first copied server-side from the throttled Common
//! Crawl bucket to an intermediary bucket, then optionally mirrored to a
//! local cache directory. Both steps skip work that is already done unless
//! the cache is explicitly bypassed, so repeating them is always safe.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use ccget_common::paths::{warc_paths_local_path, warc_paths_s3_key};
use ccget_common::CC_BUCKET;

use crate::error::StorageError;
use crate::traits::StorageClient;

/// Result of one replication attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplicateOutcome {
    /// The listing was copied to the destination bucket.
    Copied,
    /// The listing was already present and the cache was not bypassed.
    AlreadyPresent,
    /// No listing is published for this shard.
    Absent,
}

/// Result of one local fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The listing was downloaded into the cache directory.
    Downloaded,
    /// A local copy already existed and the cache was not bypassed.
    Cached,
    /// No listing exists in the source bucket for this shard.
    Absent,
}

/// Whether a shard's path listing exists in `dest_bucket`.
pub async fn is_replicated<C: StorageClient>(
    client: &C,
    shard_id: &str,
    dest_bucket: &str,
) -> Result<bool, StorageError> {
    let key: String = warc_paths_s3_key(shard_id);
    Ok(client.head_object(dest_bucket, &key).await?.is_some())
}

/// Replicate a shard's path listing to an intermediary bucket.
///
/// The key is copied over in the same pattern as the Common Crawl structure.
/// When the listing is already present and `ignore_cache` is false, this is
/// a no-op.
pub async fn replicate_warc_paths<C: StorageClient>(
    client: &C,
    shard_id: &str,
    dest_bucket: &str,
    ignore_cache: bool,
) -> Result<ReplicateOutcome, StorageError> {
    if !ignore_cache && is_replicated(client, shard_id, dest_bucket).await? {
        info!("Skipping S3 -> S3 replication for {}", shard_id);
        return Ok(ReplicateOutcome::AlreadyPresent);
    }

    let key: String = warc_paths_s3_key(shard_id);
    client
        .copy_object(CC_BUCKET, &key, dest_bucket, &key)
        .await?;
    info!("Replicated {} to s3://{}/{}", shard_id, dest_bucket, key);

    Ok(ReplicateOutcome::Copied)
}

/// Replicate path listings for a batch of shards, tolerating gaps.
///
/// Used for the monthly news feed, where some enumerated periods have no
/// published listing: each shard is probed at the source first and absent
/// ones are skipped silently instead of failing the whole run.
pub async fn replicate_warc_paths_bulk<C: StorageClient>(
    client: &C,
    shard_ids: &[String],
    dest_bucket: &str,
    ignore_cache: bool,
) -> Result<Vec<(String, ReplicateOutcome)>, StorageError> {
    let mut outcomes: Vec<(String, ReplicateOutcome)> = Vec::with_capacity(shard_ids.len());

    for shard_id in shard_ids {
        let key: String = warc_paths_s3_key(shard_id);
        if client.head_object(CC_BUCKET, &key).await?.is_none() {
            debug!("No path listing published for {}", shard_id);
            outcomes.push((shard_id.clone(), ReplicateOutcome::Absent));
            continue;
        }

        let outcome: ReplicateOutcome =
            replicate_warc_paths(client, shard_id, dest_bucket, ignore_cache).await?;
        outcomes.push((shard_id.clone(), outcome));
    }

    Ok(outcomes)
}

/// Fetch a shard's path listing into the local cache directory.
///
/// This should read from a replication target, not the Common Crawl bucket
/// itself. When a local copy exists and `ignore_cache` is false, this is a
/// no-op.
pub async fn fetch_warc_paths<C: StorageClient>(
    client: &C,
    shard_id: &str,
    cache_dir: &Path,
    source_bucket: &str,
    ignore_cache: bool,
) -> Result<FetchOutcome, StorageError> {
    if source_bucket == CC_BUCKET {
        warn!(
            "Trying to download from the Common Crawl bucket. This will probably be throttled \
             and fail! Consider copying files to an intermediate bucket first."
        );
    }

    let out_path: PathBuf = warc_paths_local_path(shard_id, cache_dir);
    if !ignore_cache && out_path.exists() {
        info!("Skipping S3 -> local fetch for {}", shard_id);
        return Ok(FetchOutcome::Cached);
    }

    let key: String = warc_paths_s3_key(shard_id);
    client
        .get_object_to_file(source_bucket, &key, &out_path)
        .await?;
    info!("Fetched {} to {}", shard_id, out_path.display());

    Ok(FetchOutcome::Downloaded)
}

/// Fetch path listings for a batch of shards, tolerating gaps.
///
/// Used for the monthly news feed, where some enumerated periods have no
/// published listing: each shard is probed first and absent ones are skipped
/// silently instead of failing the whole run.
pub async fn fetch_warc_paths_bulk<C: StorageClient>(
    client: &C,
    shard_ids: &[String],
    cache_dir: &Path,
    source_bucket: &str,
    ignore_cache: bool,
) -> Result<Vec<(String, FetchOutcome)>, StorageError> {
    let mut outcomes: Vec<(String, FetchOutcome)> = Vec::with_capacity(shard_ids.len());

    for shard_id in shard_ids {
        let key: String = warc_paths_s3_key(shard_id);
        if client.head_object(source_bucket, &key).await?.is_none() {
            debug!("No path listing published for {}", shard_id);
            outcomes.push((shard_id.clone(), FetchOutcome::Absent));
            continue;
        }

        let outcome: FetchOutcome =
            fetch_warc_paths(client, shard_id, cache_dir, source_bucket, ignore_cache).await?;
        outcomes.push((shard_id.clone(), outcome));
    }

    Ok(outcomes)
}
