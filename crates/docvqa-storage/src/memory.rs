//! In-memory storage backend.
//!
//! Stores objects in a HashMap and fabricates S3-shaped URLs. Used by the
//! API test suite so endpoint tests run without network access; also handy
//! for local development without a bucket.

use crate::keys;
use crate::s3::object_url;
use crate::traits::{Storage, StorageBackend, StorageError, StorageResult, StoredObject};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory storage implementation
pub struct MemoryStorage {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    bucket: String,
    region: String,
    key_prefix: String,
    /// When set, every store call fails with this message. Test hook.
    fail_with: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new(bucket: &str, region: &str, key_prefix: &str) -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
            bucket: bucket.to_string(),
            region: region.to_string(),
            key_prefix: key_prefix.to_string(),
            fail_with: Arc::new(Mutex::new(None)),
        }
    }

    /// Make subsequent store calls fail (simulates credential/network failure).
    pub fn fail_uploads(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    /// Number of stored objects (for test assertions).
    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Check if an object exists (for test assertions).
    pub fn has_object(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    /// Get object bytes (for test assertions).
    pub fn get_object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new("test-bucket", "us-east-1", "uploads")
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn store(
        &self,
        filename: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<StoredObject> {
        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(StorageError::UploadFailed(message));
        }

        let key = keys::generate_key(&self.key_prefix, filename);
        let url = object_url(&self.bucket, &self.region, None, &key);

        self.objects.lock().unwrap().insert(key.clone(), data);

        Ok(StoredObject { key, url })
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self.objects.lock().unwrap().contains_key(storage_key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_and_exists_roundtrip() {
        let storage = MemoryStorage::default();
        let stored = storage
            .store("report.pdf", "application/pdf", vec![1, 2, 3])
            .await
            .expect("store");

        assert!(stored.key.starts_with("uploads/"));
        assert!(stored
            .url
            .starts_with("https://test-bucket.s3.us-east-1.amazonaws.com/uploads/"));
        assert!(storage.exists(&stored.key).await.unwrap());
        assert!(!storage.exists("uploads/nope.pdf").await.unwrap());
        assert_eq!(storage.get_object(&stored.key), Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn concurrent_uploads_of_same_filename_do_not_collide() {
        let storage = Arc::new(MemoryStorage::default());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let storage = storage.clone();
            handles.push(tokio::spawn(async move {
                storage
                    .store("report.pdf", "application/pdf", vec![0u8; 16])
                    .await
                    .expect("store")
            }));
        }

        let mut urls = std::collections::HashSet::new();
        for handle in handles {
            let stored = handle.await.expect("join");
            assert!(urls.insert(stored.url), "duplicate URL generated");
        }
        assert_eq!(storage.object_count(), 8);
    }

    #[tokio::test]
    async fn fail_uploads_surfaces_upload_failed() {
        let storage = MemoryStorage::default();
        storage.fail_uploads("access denied");
        let err = storage
            .store("report.pdf", "application/pdf", vec![1])
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::UploadFailed(_)));
        assert_eq!(storage.object_count(), 0);
    }
}
