//! In-process backend library that satisfies the domain capability traits
//! without any network access. The API binary boots against it and tests
//! inject it as the backend fake.

mod builder;
mod client;
mod document_store;
mod identity;
mod object_store;

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use baas_domain::backend::{BackendClient, BackendLibrary, InitializationError};
use baas_domain::config::ClientConfig;
use baas_domain::model::ServiceKind;
use tracing::{debug, info};

pub use builder::LocalBackendBuilder;
pub use client::LocalClient;
pub use document_store::LocalDocumentStore;
pub use identity::LocalIdentity;
pub use object_store::LocalObjectStore;

pub const LIBRARY_NAME: &str = "local";

/// Shared library handle. Clones observe the same initialized app.
#[derive(Clone)]
pub struct LocalBackend {
    inner: Arc<LocalBackendInner>,
}

struct LocalBackendInner {
    unavailable_reason: Option<String>,
    disabled: HashSet<ServiceKind>,
    app: Mutex<Option<Arc<LocalClient>>>,
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LocalBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> LocalBackendBuilder {
        LocalBackendBuilder::new()
    }

    pub(crate) fn from_parts(
        unavailable_reason: Option<String>,
        disabled: HashSet<ServiceKind>,
    ) -> Self {
        Self {
            inner: Arc::new(LocalBackendInner {
                unavailable_reason,
                disabled,
                app: Mutex::new(None),
            }),
        }
    }

    /// The client created by the first successful `initialize_app`, if any.
    pub fn app(&self) -> Option<Arc<LocalClient>> {
        self.inner.app.lock().expect("mutex poisoned").clone()
    }
}

impl BackendLibrary for LocalBackend {
    fn name(&self) -> &str {
        LIBRARY_NAME
    }

    fn initialize_app(
        &self,
        config: &ClientConfig,
    ) -> Result<Arc<dyn BackendClient>, InitializationError> {
        if let Some(reason) = &self.inner.unavailable_reason {
            return Err(InitializationError::LibraryUnavailable {
                library: LIBRARY_NAME.to_string(),
                reason: reason.clone(),
            });
        }

        let missing = config.missing_fields();
        if !missing.is_empty() {
            return Err(InitializationError::MissingFields { fields: missing });
        }

        let mut app = self.inner.app.lock().expect("mutex poisoned");
        if let Some(existing) = app.as_ref() {
            if existing.config().fingerprint() == config.fingerprint() {
                debug!(project = config.project_id(), "reusing initialized local app");
                let client: Arc<dyn BackendClient> = existing.clone();
                return Ok(client);
            }
            return Err(InitializationError::ConflictingConfiguration {
                existing_project: existing.config().project_id().to_string(),
            });
        }

        let client = Arc::new(LocalClient::new(
            config.clone(),
            self.inner.disabled.clone(),
        ));
        *app = Some(client.clone());
        info!(project = config.project_id(), "local app initialized");
        Ok(client)
    }
}
