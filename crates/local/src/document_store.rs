use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use baas_domain::backend::{DocumentStore, ServiceError, ServiceResult};
use baas_domain::model::{Document, DocumentPath};
use chrono::Utc;
use serde_json::Value;

#[derive(Default)]
pub struct LocalDocumentStore {
    documents: Mutex<HashMap<DocumentPath, Document>>,
}

impl LocalDocumentStore {
    pub fn len(&self) -> usize {
        self.documents.lock().expect("mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate(path: &DocumentPath) -> ServiceResult<()> {
    if path.collection.trim().is_empty() || path.id.trim().is_empty() {
        return Err(ServiceError::Backend(
            "document path requires a collection and an id".into(),
        ));
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn set_document(&self, path: &DocumentPath, data: Value) -> ServiceResult<Document> {
        validate(path)?;
        let now = Utc::now();
        let mut guard = self.documents.lock().expect("mutex poisoned");
        let created_at = guard
            .get(path)
            .map(|existing| existing.created_at)
            .unwrap_or(now);
        let document = Document {
            collection: path.collection.clone(),
            id: path.id.clone(),
            data,
            created_at,
            updated_at: now,
        };
        guard.insert(path.clone(), document.clone());
        Ok(document)
    }

    async fn get_document(&self, path: &DocumentPath) -> ServiceResult<Option<Document>> {
        validate(path)?;
        Ok(self
            .documents
            .lock()
            .expect("mutex poisoned")
            .get(path)
            .cloned())
    }

    async fn delete_document(&self, path: &DocumentPath) -> ServiceResult<bool> {
        validate(path)?;
        Ok(self
            .documents
            .lock()
            .expect("mutex poisoned")
            .remove(path)
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn overwrite_keeps_creation_time() {
        let store = LocalDocumentStore::default();
        let path = DocumentPath::new("trees", "oak-1");

        let first = store
            .set_document(&path, json!({ "height": 12 }))
            .await
            .unwrap();
        let second = store
            .set_document(&path, json!({ "height": 13 }))
            .await
            .unwrap();

        assert_eq!(first.created_at, second.created_at);
        assert!(second.updated_at >= first.updated_at);
        let stored = store.get_document(&path).await.unwrap().unwrap();
        assert_eq!(stored.data, json!({ "height": 13 }));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn delete_reports_presence() {
        let store = LocalDocumentStore::default();
        let path = DocumentPath::new("trees", "elm-7");
        assert!(!store.delete_document(&path).await.unwrap());

        store.set_document(&path, json!({})).await.unwrap();
        assert!(store.delete_document(&path).await.unwrap());
        assert!(store.get_document(&path).await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn blank_path_is_rejected() {
        let store = LocalDocumentStore::default();
        let err = store
            .set_document(&DocumentPath::new("", "x"), json!(null))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Backend(_)));
    }
}
