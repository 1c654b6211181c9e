use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use baas_domain::backend::{ObjectStore, ServiceError, ServiceResult};
use baas_domain::model::{ObjectMetadata, StoredObject};
use chrono::Utc;
use hex::encode as hex_encode;
use sha3::{Digest, Sha3_256};

/// Objects of a single bucket, keyed by their path with leading slashes
/// stripped.
pub struct LocalObjectStore {
    bucket: String,
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl LocalObjectStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Mutex::new(HashMap::new()),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

fn normalize(path: &str) -> ServiceResult<String> {
    let trimmed = path.trim().trim_start_matches('/');
    if trimmed.is_empty() {
        return Err(ServiceError::Backend("object path must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put_object(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: Option<String>,
    ) -> ServiceResult<ObjectMetadata> {
        let path = normalize(path)?;
        let metadata = ObjectMetadata {
            bucket: self.bucket.clone(),
            path: path.clone(),
            content_type,
            size: bytes.len() as u64,
            digest: hex_encode(Sha3_256::digest(&bytes)),
            uploaded_at: Utc::now(),
        };
        self.objects.lock().expect("mutex poisoned").insert(
            path,
            StoredObject {
                metadata: metadata.clone(),
                bytes,
            },
        );
        Ok(metadata)
    }

    async fn get_object(&self, path: &str) -> ServiceResult<Option<StoredObject>> {
        let path = normalize(path)?;
        Ok(self
            .objects
            .lock()
            .expect("mutex poisoned")
            .get(&path)
            .cloned())
    }

    async fn delete_object(&self, path: &str) -> ServiceResult<bool> {
        let path = normalize(path)?;
        Ok(self
            .objects
            .lock()
            .expect("mutex poisoned")
            .remove(&path)
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_bytes_with_metadata() {
        let store = LocalObjectStore::new("arborist.appspot.com");
        let meta = store
            .put_object(
                "/photos/oak.jpg",
                b"jpeg".to_vec(),
                Some("image/jpeg".into()),
            )
            .await
            .unwrap();
        assert_eq!(meta.bucket, "arborist.appspot.com");
        assert_eq!(meta.path, "photos/oak.jpg");
        assert_eq!(meta.size, 4);
        assert_eq!(meta.digest.len(), 64);

        let stored = store.get_object("photos/oak.jpg").await.unwrap().unwrap();
        assert_eq!(stored.bytes, b"jpeg".to_vec());
        assert_eq!(stored.metadata, meta);
    }

    #[tokio::test]
    async fn delete_and_missing_objects() {
        let store = LocalObjectStore::new("b");
        assert!(store.get_object("nope").await.unwrap().is_none());
        store.put_object("a.txt", vec![1], None).await.unwrap();
        assert!(store.delete_object("a.txt").await.unwrap());
        assert!(!store.delete_object("a.txt").await.unwrap());
    }

    #[tokio::test]
    async fn empty_path_is_rejected() {
        let store = LocalObjectStore::new("b");
        assert!(store.put_object(" / ", vec![], None).await.is_err());
    }
}
