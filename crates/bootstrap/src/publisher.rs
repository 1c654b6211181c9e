use std::sync::Arc;

use baas_domain::backend::{
    BackendClient, BackendLibrary, DocumentStore, IdentityService, InitializationError,
    ObjectStore,
};
use baas_domain::config::ClientConfig;
use baas_domain::model::{
    AUTH_HANDLE_NAME, CLIENT_NAME, DOCUMENT_STORE_HANDLE_NAME, OBJECT_STORE_HANDLE_NAME,
};
use metrics::counter;
use once_cell::sync::{Lazy, OnceCell};
use tracing::{debug, error, warn};

use crate::{bootstrap, BackendContext, BootstrapError, ServiceUnavailable};

static GLOBAL: Lazy<Publisher> = Lazy::new(Publisher::new);

/// Write-once slot for a [`BackendContext`].
///
/// The first successful [`Publisher::publish`] fixes the context for the
/// lifetime of the publisher. Repeating it with the same configuration is a
/// no-op; a different configuration is rejected and leaves the published
/// context untouched. Failed attempts publish nothing.
#[derive(Default)]
pub struct Publisher {
    slot: OnceCell<BackendContext>,
}

impl Publisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(
        &self,
        library: &dyn BackendLibrary,
        config: &ClientConfig,
    ) -> Result<&BackendContext, BootstrapError> {
        let mut fresh = false;
        let result = self.slot.get_or_try_init(|| {
            fresh = true;
            bootstrap(library, config)
        });

        let context = match result {
            Ok(context) => context,
            Err(err) => {
                counter!("bootstrap_attempts_total", "outcome" => err.kind()).increment(1);
                error!(error = %err, "backend bootstrap failed; nothing published");
                return Err(err);
            }
        };

        if context.fingerprint() != config.fingerprint() {
            counter!("bootstrap_attempts_total", "outcome" => "conflict").increment(1);
            warn!(
                published_project = context.project_id(),
                requested_project = config.project_id(),
                "refusing to republish backend handles with a different configuration"
            );
            return Err(InitializationError::ConflictingConfiguration {
                existing_project: context.project_id().to_string(),
            }
            .into());
        }

        if fresh {
            counter!("bootstrap_attempts_total", "outcome" => "published").increment(1);
        } else {
            counter!("bootstrap_attempts_total", "outcome" => "reused").increment(1);
            debug!("backend handles already published for this configuration");
        }
        Ok(context)
    }

    pub fn is_published(&self) -> bool {
        self.slot.get().is_some()
    }

    pub fn context(&self) -> Result<&BackendContext, ServiceUnavailable> {
        self.slot
            .get()
            .ok_or(ServiceUnavailable { name: CLIENT_NAME })
    }

    pub fn client(&self) -> Result<&Arc<dyn BackendClient>, ServiceUnavailable> {
        self.slot
            .get()
            .map(BackendContext::client)
            .ok_or(ServiceUnavailable { name: CLIENT_NAME })
    }

    pub fn auth(&self) -> Result<&Arc<dyn IdentityService>, ServiceUnavailable> {
        self.slot.get().map(BackendContext::auth).ok_or(ServiceUnavailable {
            name: AUTH_HANDLE_NAME,
        })
    }

    pub fn document_store(&self) -> Result<&Arc<dyn DocumentStore>, ServiceUnavailable> {
        self.slot
            .get()
            .map(BackendContext::document_store)
            .ok_or(ServiceUnavailable {
                name: DOCUMENT_STORE_HANDLE_NAME,
            })
    }

    pub fn object_store(&self) -> Result<&Arc<dyn ObjectStore>, ServiceUnavailable> {
        self.slot
            .get()
            .map(BackendContext::object_store)
            .ok_or(ServiceUnavailable {
                name: OBJECT_STORE_HANDLE_NAME,
            })
    }
}

/// Process-wide publisher for components that cannot be handed a context.
pub fn global() -> &'static Publisher {
    &GLOBAL
}

pub fn publish_global(
    library: &dyn BackendLibrary,
    config: &ClientConfig,
) -> Result<&'static BackendContext, BootstrapError> {
    global().publish(library, config)
}

pub fn published() -> Result<&'static BackendContext, ServiceUnavailable> {
    global().context()
}
