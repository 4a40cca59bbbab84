//! Preflight validation for batch operations.
//!
//! Every check runs before any mutating remote call, so a failed check
//! leaves no remote side effects.

use std::path::Path;

use log::warn;

use ccget_catalog::{is_news_shard, ShardInfo};
use ccget_common::{AWS_REGION, VOLUME_GUARD_MAX_KEYS};
use ccget_storage::StorageClient;

use crate::error::{BatchError, PreflightError};
use crate::types::StorageClass;

/// Fail unless `bucket` lives in the designated region.
///
/// The default region reports no location constraint, so a `None`/empty
/// sentinel passes. Anything else would pay cross-region transfer on every
/// copied object.
pub async fn verify_bucket_region<C: StorageClient>(
    client: &C,
    bucket: &str,
) -> Result<(), BatchError> {
    let location: Option<String> = client
        .get_bucket_location(bucket)
        .await
        .map_err(BatchError::Storage)?;

    match location.as_deref() {
        None | Some("") => Ok(()),
        Some(region) => Err(PreflightError::Configuration {
            message: format!(
                "To avoid cross-region data transfer the destination bucket must be in {}! \
                 Found {}",
                AWS_REGION, region
            ),
        }
        .into()),
    }
}

/// Cost guards for copy jobs. A key is roughly 1 GB of data.
///
/// `n == 0` archives an entire shard and anything above 1000 keys is about a
/// terabyte; both demand the deep-archive class. With `ignore_checks` the
/// guards downgrade to warnings.
pub fn verify_storage_class_for_volume(
    n: usize,
    storage_class: StorageClass,
    ignore_checks: bool,
) -> Result<(), PreflightError> {
    if storage_class == StorageClass::DeepArchive {
        return Ok(());
    }

    if n == 0 {
        if !ignore_checks {
            return Err(PreflightError::Policy {
                message: format!(
                    "Cannot archive ALL common crawl files to non-Deep Archive storage class {}",
                    storage_class
                ),
            });
        }
        warn!(
            "Archiving ALL files to storage class {} with checks disabled",
            storage_class
        );
    } else if n > VOLUME_GUARD_MAX_KEYS {
        if !ignore_checks {
            return Err(PreflightError::Policy {
                message: "Estimated archive size is over 1 TB to non-Deep Archive!".to_string(),
            });
        }
        warn!(
            "Archiving over 1 TB to storage class {} with checks disabled",
            storage_class
        );
    }

    Ok(())
}

/// Exactly one key source must be given.
pub fn verify_shard_or_manifest_file(
    shard: Option<&str>,
    manifest_file: Option<&Path>,
) -> Result<(), PreflightError> {
    match (shard, manifest_file) {
        (Some(_), Some(_)) | (None, None) => Err(PreflightError::Usage {
            message: "Specify either a shard OR a manifest file".to_string(),
        }),
        _ => Ok(()),
    }
}

/// A requested shard must be a news period or a catalog entry.
///
/// News shards never appear in the collection index: they are validated by
/// naming pattern and require a local cache directory for their listings.
pub fn verify_shard_exists(
    shard: &str,
    cache_dir: Option<&Path>,
    known: &[ShardInfo],
) -> Result<(), PreflightError> {
    if is_news_shard(shard) {
        if cache_dir.is_none() {
            return Err(PreflightError::Usage {
                message: format!(
                    "Shard {} requires a cache directory for its path listings",
                    shard
                ),
            });
        }
        return Ok(());
    }

    if known.iter().any(|s| s.id == shard) {
        Ok(())
    } else {
        Err(PreflightError::UnknownShard {
            shard: shard.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shard(id: &str) -> ShardInfo {
        ShardInfo {
            id: id.to_string(),
            name: id.to_string(),
        }
    }

    #[test]
    fn test_volume_guard_rejects_all_files_to_standard() {
        let result = verify_storage_class_for_volume(0, StorageClass::Standard, false);
        assert!(matches!(result, Err(PreflightError::Policy { .. })));
    }

    #[test]
    fn test_volume_guard_allows_all_files_to_deep_archive() {
        assert!(verify_storage_class_for_volume(0, StorageClass::DeepArchive, false).is_ok());
    }

    #[test]
    fn test_volume_guard_override_allows_all_files_to_standard() {
        assert!(verify_storage_class_for_volume(0, StorageClass::Standard, true).is_ok());
    }

    #[test]
    fn test_volume_guard_rejects_large_counts_to_standard() {
        let result = verify_storage_class_for_volume(1001, StorageClass::Standard, false);
        assert!(matches!(result, Err(PreflightError::Policy { .. })));

        assert!(verify_storage_class_for_volume(1000, StorageClass::Standard, false).is_ok());
        assert!(verify_storage_class_for_volume(1001, StorageClass::Standard, true).is_ok());
        assert!(verify_storage_class_for_volume(1001, StorageClass::DeepArchive, false).is_ok());
    }

    #[test]
    fn test_shard_or_manifest_file_requires_exactly_one() {
        let file = Path::new("manifest.csv");

        assert!(verify_shard_or_manifest_file(None, None).is_err());
        assert!(verify_shard_or_manifest_file(Some("CC-MAIN-2023-06"), Some(file)).is_err());
        assert!(verify_shard_or_manifest_file(Some("CC-MAIN-2023-06"), None).is_ok());
        assert!(verify_shard_or_manifest_file(None, Some(file)).is_ok());
    }

    #[test]
    fn test_shard_exists_in_catalog() {
        let known: Vec<ShardInfo> = vec![shard("CC-MAIN-2023-06")];

        assert!(verify_shard_exists("CC-MAIN-2023-06", None, &known).is_ok());
        assert!(matches!(
            verify_shard_exists("CC-MAIN-1999-01", None, &known),
            Err(PreflightError::UnknownShard { .. })
        ));
    }

    #[test]
    fn test_news_shard_requires_cache_dir() {
        let known: Vec<ShardInfo> = Vec::new();

        assert!(matches!(
            verify_shard_exists("CC-NEWS/2016/08", None, &known),
            Err(PreflightError::Usage { .. })
        ));
        assert!(verify_shard_exists("CC-NEWS/2016/08", Some(Path::new("/cache")), &known).is_ok());
    }
}
