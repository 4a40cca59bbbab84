//! Subcommand implementations.

pub mod copy;
pub mod create_role;
pub mod job_status;
pub mod replicate;
pub mod restore;

use std::path::Path;

use anyhow::{Context, Result};

use ccget_catalog::{is_news_shard, CatalogClient, ShardInfo};
use ccget_common::paths::{read_paths_file, warc_paths_local_path};

/// Load the cached key listing for a shard.
pub(crate) fn load_shard_keys(shard_id: &str, cache_dir: &Path) -> Result<Vec<String>> {
    let path = warc_paths_local_path(shard_id, cache_dir);
    let keys: Vec<String> = read_paths_file(&path).with_context(|| {
        format!(
            "Path listing for {} is not cached; run `ccget replicate` first",
            shard_id
        )
    })?;
    Ok(keys)
}

/// Fetch the shard catalog when the shard needs catalog validation.
///
/// News shards are validated by naming pattern alone, so the catalog round
/// trip is skipped for them.
pub(crate) async fn catalog_shards_for(shard_id: &str) -> Result<Vec<ShardInfo>> {
    if is_news_shard(shard_id) {
        return Ok(Vec::new());
    }
    Ok(CatalogClient::new().list_shards().await?)
}

/// Description string recorded on submitted jobs.
pub(crate) fn job_description(
    operation: &str,
    source: &str,
    contact: Option<&str>,
) -> Option<String> {
    match contact {
        Some(contact) => Some(format!("{} of {} (contact: {})", operation, source, contact)),
        None => Some(format!("{} of {}", operation, source)),
    }
}
