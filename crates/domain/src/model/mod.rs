//! Value types exchanged with the backend capabilities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Well-known name under which the initialized client is published.
pub const CLIENT_NAME: &str = "client";
/// Well-known name of the identity-service handle.
pub const AUTH_HANDLE_NAME: &str = "authHandle";
/// Well-known name of the document-store handle.
pub const DOCUMENT_STORE_HANDLE_NAME: &str = "documentStoreHandle";
/// Well-known name of the object-store handle.
pub const OBJECT_STORE_HANDLE_NAME: &str = "objectStoreHandle";

/// The three capabilities a backend client hands out.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ServiceKind {
    Identity,
    DocumentStore,
    ObjectStore,
}

impl ServiceKind {
    /// Name the handle for this capability is published under.
    pub fn handle_name(self) -> &'static str {
        match self {
            ServiceKind::Identity => AUTH_HANDLE_NAME,
            ServiceKind::DocumentStore => DOCUMENT_STORE_HANDLE_NAME,
            ServiceKind::ObjectStore => OBJECT_STORE_HANDLE_NAME,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub uid: UserId,
    pub anonymous: bool,
    pub signed_in_at: DateTime<Utc>,
}

/// Address of a document: `collection/id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    pub collection: String,
    pub id: String,
}

impl DocumentPath {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub collection: String,
    pub id: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    pub bucket: String,
    pub path: String,
    pub content_type: Option<String>,
    pub size: u64,
    /// Hex-encoded SHA3-256 of the object bytes.
    pub digest: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub metadata: ObjectMetadata,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn service_kind_names_are_snake_case() {
        assert_eq!(ServiceKind::DocumentStore.as_ref(), "document_store");
        assert_eq!(
            ServiceKind::from_str("object_store").unwrap(),
            ServiceKind::ObjectStore
        );
        assert!(ServiceKind::from_str("messaging").is_err());
    }

    #[test]
    fn every_service_has_a_distinct_handle_name() {
        let names: Vec<_> = ServiceKind::iter().map(ServiceKind::handle_name).collect();
        assert_eq!(
            names,
            vec![
                AUTH_HANDLE_NAME,
                DOCUMENT_STORE_HANDLE_NAME,
                OBJECT_STORE_HANDLE_NAME
            ]
        );
    }
}
