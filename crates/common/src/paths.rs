//! Path resolution for Common Crawl data objects.
//!
//! Pure derivations from a shard id to its path-listing object key and local
//! cache location, plus a reader for the gzip-compressed listings once they
//! are cached. The cache mirrors the S3 hierarchy:
//!
//! ```text
//! s3://{bucket}/crawl-data/{shard_id}/warc.paths.gz
//! {cache_dir}/{shard_id}/warc.paths.gz
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use thiserror::Error;

use crate::constants::CC_BUCKET;

/// S3 key of the WARC path listing for a shard.
pub fn warc_paths_s3_key(shard_id: &str) -> String {
    format!("crawl-data/{}/warc.paths.gz", shard_id)
}

/// S3 key of the WET path listing for a shard.
pub fn wet_paths_s3_key(shard_id: &str) -> String {
    format!("crawl-data/{}/wet.paths.gz", shard_id)
}

/// Full s3:// URL of the WARC path listing in `bucket`.
pub fn warc_paths_url(shard_id: &str, bucket: &str) -> String {
    format!("s3://{}/{}", bucket, warc_paths_s3_key(shard_id))
}

/// Full s3:// URL of a key in the Common Crawl source bucket.
pub fn source_url(key: &str) -> String {
    format!("s3://{}/{}", CC_BUCKET, key)
}

/// Local cache location of a shard's WARC path listing.
pub fn warc_paths_local_path(shard_id: &str, cache_dir: &Path) -> PathBuf {
    cache_dir.join(shard_id).join("warc.paths.gz")
}

/// Error reading a local path listing.
#[derive(Debug, Error)]
#[error("Failed to read path listing {path}: {message}")]
pub struct PathsFileError {
    /// Path of the listing file.
    pub path: String,
    /// Underlying error message.
    pub message: String,
}

impl PathsFileError {
    fn from_io(path: &Path, err: std::io::Error) -> Self {
        Self {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// Read the object keys from a gzip-compressed path listing.
///
/// Keys are returned in file order. Blank lines are skipped.
pub fn read_paths_file(path: &Path) -> Result<Vec<String>, PathsFileError> {
    let file: File = File::open(path).map_err(|e| PathsFileError::from_io(path, e))?;
    let reader = BufReader::new(GzDecoder::new(file));

    let mut keys: Vec<String> = Vec::new();
    for line in reader.lines() {
        let line: String = line.map_err(|e| PathsFileError::from_io(path, e))?;
        if !line.trim().is_empty() {
            keys.push(line);
        }
    }

    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;

    #[test]
    fn test_warc_paths_s3_key() {
        assert_eq!(
            warc_paths_s3_key("CC-MAIN-2023-06"),
            "crawl-data/CC-MAIN-2023-06/warc.paths.gz"
        );
    }

    #[test]
    fn test_wet_paths_s3_key() {
        assert_eq!(
            wet_paths_s3_key("CC-MAIN-2023-06"),
            "crawl-data/CC-MAIN-2023-06/wet.paths.gz"
        );
    }

    #[test]
    fn test_warc_paths_url() {
        assert_eq!(
            warc_paths_url("CC-MAIN-2023-06", "my-bucket"),
            "s3://my-bucket/crawl-data/CC-MAIN-2023-06/warc.paths.gz"
        );
    }

    #[test]
    fn test_source_url() {
        assert_eq!(
            source_url("crawl-data/CC-MAIN-2023-06/warc.paths.gz"),
            "s3://commoncrawl/crawl-data/CC-MAIN-2023-06/warc.paths.gz"
        );
    }

    #[test]
    fn test_warc_paths_local_path_mirrors_shard_hierarchy() {
        let path: PathBuf = warc_paths_local_path("CC-NEWS/2016/08", Path::new("/cache"));
        assert_eq!(path, Path::new("/cache/CC-NEWS/2016/08/warc.paths.gz"));
    }

    #[test]
    fn test_read_paths_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("warc.paths.gz");

        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b"crawl-data/a.warc.gz\ncrawl-data/b.warc.gz\n\n").unwrap();
        encoder.finish().unwrap();

        let keys: Vec<String> = read_paths_file(&path).unwrap();
        assert_eq!(keys, vec!["crawl-data/a.warc.gz", "crawl-data/b.warc.gz"]);
    }

    #[test]
    fn test_read_paths_file_missing() {
        let err = read_paths_file(Path::new("/nonexistent/warc.paths.gz")).unwrap_err();
        assert!(err.to_string().contains("warc.paths.gz"));
    }
}
