//! Storage factory.

use crate::s3::S3Storage;
use crate::traits::{Storage, StorageError, StorageResult};
use docvqa_core::Config;
use std::sync::Arc;

/// Build the storage backend from configuration.
///
/// Configuration validation has already required a bucket (and a region
/// unless a custom endpoint is set), so missing values here are reported as
/// configuration errors rather than panics.
pub fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let bucket = config
        .s3_bucket()
        .ok_or_else(|| StorageError::ConfigError("S3_BUCKET is not set".to_string()))?
        .to_string();
    let region = config.s3_region().unwrap_or("us-east-1").to_string();
    let endpoint = config.s3_endpoint().map(|s| s.to_string());

    let storage = S3Storage::new(
        bucket,
        region,
        endpoint,
        config.upload_key_prefix().to_string(),
    )?;

    tracing::info!(
        bucket = %config.s3_bucket().unwrap_or_default(),
        endpoint = ?config.s3_endpoint(),
        key_prefix = %config.upload_key_prefix(),
        "Storage backend initialized"
    );

    Ok(Arc::new(storage))
}
