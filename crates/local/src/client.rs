use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use baas_domain::backend::{
    BackendClient, DocumentStore, HandleAcquisitionError, IdentityService, ObjectStore,
};
use baas_domain::config::ClientConfig;
use baas_domain::model::ServiceKind;
use tracing::warn;

use crate::{LocalDocumentStore, LocalIdentity, LocalObjectStore};

pub struct LocalClient {
    config: ClientConfig,
    initialized: AtomicBool,
    disabled: HashSet<ServiceKind>,
    identity: Arc<LocalIdentity>,
    documents: Arc<LocalDocumentStore>,
    objects: Arc<LocalObjectStore>,
}

impl LocalClient {
    pub(crate) fn new(config: ClientConfig, disabled: HashSet<ServiceKind>) -> Self {
        let objects = Arc::new(LocalObjectStore::new(config.storage_bucket()));
        Self {
            config,
            initialized: AtomicBool::new(true),
            disabled,
            identity: Arc::new(LocalIdentity::default()),
            documents: Arc::new(LocalDocumentStore::default()),
            objects,
        }
    }

    /// Marks the client as torn down; later handle requests fail.
    pub fn shutdown(&self) {
        self.initialized.store(false, Ordering::SeqCst);
    }

    fn check(&self, service: ServiceKind) -> Result<(), HandleAcquisitionError> {
        if !self.is_initialized() {
            return Err(HandleAcquisitionError::NotInitialized { service });
        }
        if self.disabled.contains(&service) {
            warn!(%service, "capability disabled in local backend");
            return Err(HandleAcquisitionError::Unavailable {
                service,
                reason: "disabled in local backend".to_string(),
            });
        }
        Ok(())
    }
}

impl BackendClient for LocalClient {
    fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    fn identity(&self) -> Result<Arc<dyn IdentityService>, HandleAcquisitionError> {
        self.check(ServiceKind::Identity)?;
        Ok(self.identity.clone())
    }

    fn document_store(&self) -> Result<Arc<dyn DocumentStore>, HandleAcquisitionError> {
        self.check(ServiceKind::DocumentStore)?;
        Ok(self.documents.clone())
    }

    fn object_store(&self) -> Result<Arc<dyn ObjectStore>, HandleAcquisitionError> {
        self.check(ServiceKind::ObjectStore)?;
        Ok(self.objects.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(disabled: &[ServiceKind]) -> LocalClient {
        LocalClient::new(
            ClientConfig::new("k", "d", "p", "b", "m", "a"),
            disabled.iter().copied().collect(),
        )
    }

    #[test]
    fn hands_out_all_capabilities() {
        let client = client(&[]);
        assert!(client.identity().is_ok());
        assert!(client.document_store().is_ok());
        assert!(client.object_store().is_ok());
    }

    #[test]
    fn disabled_capability_is_unavailable() {
        let client = client(&[ServiceKind::ObjectStore]);
        let err = client.object_store().err().expect("disabled");
        assert!(matches!(
            err,
            HandleAcquisitionError::Unavailable {
                service: ServiceKind::ObjectStore,
                ..
            }
        ));
        assert!(client.identity().is_ok());
    }

    #[test]
    fn shutdown_client_refuses_handles() {
        let client = client(&[]);
        client.shutdown();
        assert!(!client.is_initialized());
        let err = client.identity().err().expect("not initialized");
        assert_eq!(
            err,
            HandleAcquisitionError::NotInitialized {
                service: ServiceKind::Identity
            }
        );
    }
}
