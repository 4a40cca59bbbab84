//! Batch job manifest construction.
//!
//! A manifest is a two-column CSV (bucket, key) with no header row, one row
//! per object a batch job should act on. Manifests are staged in a scoped
//! temporary directory and uploaded to the destination bucket under the
//! configured prefix as `manifest-{suffix}.csv`.

use std::path::Path;

use rand::Rng;

use ccget_common::sampling::manifest_suffix;

use crate::error::StorageError;
use crate::traits::StorageClient;

/// Write and upload a batch job manifest for `keys`.
///
/// Every row references `source_bucket` and row order equals input order.
/// The object name carries a random suffix so concurrent invocations cannot
/// collide. The staging directory is removed on every exit path, including
/// upload failure.
///
/// Returns the uploaded key. The caller must pin the object's ETag before
/// referencing the manifest in a job submission; an uploaded manifest whose
/// submission later fails is left in place.
///
/// # Arguments
/// * `client` - Storage client for S3 operations
/// * `keys` - Object keys the job should act on
/// * `manifest_prefix` - Key prefix in the destination bucket
/// * `source_bucket` - Bucket recorded in every manifest row
/// * `dest_bucket` - Bucket the manifest is uploaded to
/// * `rng` - Entropy source for the name suffix
pub async fn create_job_manifest<C: StorageClient>(
    client: &C,
    keys: &[String],
    manifest_prefix: &str,
    source_bucket: &str,
    dest_bucket: &str,
    rng: &mut (impl Rng + Send),
) -> Result<String, StorageError> {
    let manifest_name: String = format!("manifest-{}.csv", manifest_suffix(rng));
    let s3_manifest_key: String = format!("{}/{}", manifest_prefix, manifest_name);

    let tmpdir =
        tempfile::tempdir().map_err(|e| StorageError::from_io("manifest staging dir", e))?;
    let manifest_path = tmpdir.path().join(&manifest_name);

    write_manifest_csv(&manifest_path, source_bucket, keys)?;

    client
        .put_object_from_file(dest_bucket, &s3_manifest_key, &manifest_path)
        .await?;

    Ok(s3_manifest_key)
}

fn write_manifest_csv(
    path: &Path,
    source_bucket: &str,
    keys: &[String],
) -> Result<(), StorageError> {
    let to_storage_err = |e: csv::Error| StorageError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let mut writer = csv::Writer::from_path(path).map_err(to_storage_err)?;
    for key in keys {
        writer
            .write_record([source_bucket, key.as_str()])
            .map_err(to_storage_err)?;
    }
    writer
        .flush()
        .map_err(|e| StorageError::from_io(path.display().to_string(), e))?;

    Ok(())
}

/// Read object keys from a local manifest CSV.
///
/// Rows are (bucket, key) with no header; the bucket column is ignored.
pub fn read_manifest_file(path: &Path) -> Result<Vec<String>, StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| StorageError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let mut keys: Vec<String> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| StorageError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let key: &str = record.get(1).ok_or_else(|| StorageError::Other {
            message: format!("Manifest row missing key column in {}", path.display()),
        })?;
        keys.push(key.to_string());
    }

    Ok(keys)
}
