use std::{fmt, sync::Arc};

use baas_domain::backend::{BackendClient, DocumentStore, IdentityService, ObjectStore};
use baas_domain::model::{
    ServiceKind, AUTH_HANDLE_NAME, CLIENT_NAME, DOCUMENT_STORE_HANDLE_NAME,
    OBJECT_STORE_HANDLE_NAME,
};

/// The four handles produced by a successful bootstrap. Only ever built
/// with every handle present.
#[derive(Clone)]
pub struct BackendContext {
    library: String,
    fingerprint: String,
    client: Arc<dyn BackendClient>,
    auth: Arc<dyn IdentityService>,
    document_store: Arc<dyn DocumentStore>,
    object_store: Arc<dyn ObjectStore>,
}

/// A published handle looked up by its well-known name.
#[derive(Clone)]
pub enum PublishedHandle {
    Client(Arc<dyn BackendClient>),
    Auth(Arc<dyn IdentityService>),
    DocumentStore(Arc<dyn DocumentStore>),
    ObjectStore(Arc<dyn ObjectStore>),
}

impl PublishedHandle {
    /// Capability behind the handle; `None` for the client itself.
    pub fn service(&self) -> Option<ServiceKind> {
        match self {
            PublishedHandle::Client(_) => None,
            PublishedHandle::Auth(_) => Some(ServiceKind::Identity),
            PublishedHandle::DocumentStore(_) => Some(ServiceKind::DocumentStore),
            PublishedHandle::ObjectStore(_) => Some(ServiceKind::ObjectStore),
        }
    }
}

impl BackendContext {
    pub(crate) fn new(
        library: impl Into<String>,
        client: Arc<dyn BackendClient>,
        auth: Arc<dyn IdentityService>,
        document_store: Arc<dyn DocumentStore>,
        object_store: Arc<dyn ObjectStore>,
    ) -> Self {
        let fingerprint = client.config().fingerprint();
        Self {
            library: library.into(),
            fingerprint,
            client,
            auth,
            document_store,
            object_store,
        }
    }

    /// Name of the backend library the client came from.
    pub fn library(&self) -> &str {
        &self.library
    }

    /// Fingerprint of the configuration the client was initialized with.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn project_id(&self) -> &str {
        self.client.config().project_id()
    }

    pub fn client(&self) -> &Arc<dyn BackendClient> {
        &self.client
    }

    pub fn auth(&self) -> &Arc<dyn IdentityService> {
        &self.auth
    }

    pub fn document_store(&self) -> &Arc<dyn DocumentStore> {
        &self.document_store
    }

    pub fn object_store(&self) -> &Arc<dyn ObjectStore> {
        &self.object_store
    }

    pub fn lookup(&self, name: &str) -> Option<PublishedHandle> {
        match name {
            CLIENT_NAME => Some(PublishedHandle::Client(self.client.clone())),
            AUTH_HANDLE_NAME => Some(PublishedHandle::Auth(self.auth.clone())),
            DOCUMENT_STORE_HANDLE_NAME => {
                Some(PublishedHandle::DocumentStore(self.document_store.clone()))
            }
            OBJECT_STORE_HANDLE_NAME => {
                Some(PublishedHandle::ObjectStore(self.object_store.clone()))
            }
            _ => None,
        }
    }

    /// Well-known names, client first.
    pub fn names() -> [&'static str; 4] {
        [
            CLIENT_NAME,
            AUTH_HANDLE_NAME,
            DOCUMENT_STORE_HANDLE_NAME,
            OBJECT_STORE_HANDLE_NAME,
        ]
    }
}

impl fmt::Debug for BackendContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendContext")
            .field("library", &self.library)
            .field("project_id", &self.project_id())
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}
