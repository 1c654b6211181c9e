use std::{fmt, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::model::{
    Document, DocumentPath, ObjectMetadata, ServiceKind, StoredObject, UserId, UserSession,
};

/// Common result alias for capability operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("backend error: {0}")]
    Backend(String),
    #[error("not signed in")]
    NotSignedIn,
}

impl ServiceError {
    pub fn from_source(err: impl fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Raised when a backend client cannot be created for a configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InitializationError {
    #[error("client config is missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },
    #[error("backend library `{library}` is unavailable: {reason}")]
    LibraryUnavailable { library: String, reason: String },
    #[error(
        "a client is already initialized for project `{existing_project}` with a different configuration"
    )]
    ConflictingConfiguration { existing_project: String },
}

/// Raised when an initialized client cannot hand out one of its capabilities.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandleAcquisitionError {
    #[error("cannot acquire {service} handle: client is not initialized")]
    NotInitialized { service: ServiceKind },
    #[error("cannot acquire {service} handle: {reason}")]
    Unavailable { service: ServiceKind, reason: String },
}

impl HandleAcquisitionError {
    pub fn service(&self) -> ServiceKind {
        match self {
            Self::NotInitialized { service } | Self::Unavailable { service, .. } => *service,
        }
    }
}

#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn sign_in_anonymously(&self) -> ServiceResult<UserSession>;
    async fn current_user(&self) -> ServiceResult<Option<UserId>>;
    async fn sign_out(&self) -> ServiceResult<()>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn set_document(&self, path: &DocumentPath, data: Value) -> ServiceResult<Document>;
    async fn get_document(&self, path: &DocumentPath) -> ServiceResult<Option<Document>>;
    async fn delete_document(&self, path: &DocumentPath) -> ServiceResult<bool>;
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: Option<String>,
    ) -> ServiceResult<ObjectMetadata>;
    async fn get_object(&self, path: &str) -> ServiceResult<Option<StoredObject>>;
    async fn delete_object(&self, path: &str) -> ServiceResult<bool>;
}

/// Client bound to one configuration, from which the capability handles are
/// derived.
pub trait BackendClient: Send + Sync {
    fn config(&self) -> &ClientConfig;
    fn is_initialized(&self) -> bool;
    fn identity(&self) -> Result<Arc<dyn IdentityService>, HandleAcquisitionError>;
    fn document_store(&self) -> Result<Arc<dyn DocumentStore>, HandleAcquisitionError>;
    fn object_store(&self) -> Result<Arc<dyn ObjectStore>, HandleAcquisitionError>;
}

/// Entry point of a backend client library. Passed explicitly into the
/// bootstrap routine instead of being looked up from ambient state.
pub trait BackendLibrary: Send + Sync {
    fn name(&self) -> &str;
    fn initialize_app(
        &self,
        config: &ClientConfig,
    ) -> Result<Arc<dyn BackendClient>, InitializationError>;
}
