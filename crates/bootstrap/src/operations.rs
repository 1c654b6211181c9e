use std::sync::Arc;

use baas_domain::backend::{
    BackendClient, BackendLibrary, DocumentStore, HandleAcquisitionError, IdentityService,
    InitializationError, ObjectStore,
};
use baas_domain::config::ClientConfig;
use baas_domain::model::ServiceKind;
use tracing::{debug, info, instrument};

use crate::{BackendContext, BootstrapError};

/// Asks `library` for a client bound to `config`. Blank fields are rejected
/// before the library is consulted.
pub fn initialize(
    library: &dyn BackendLibrary,
    config: &ClientConfig,
) -> Result<Arc<dyn BackendClient>, InitializationError> {
    let missing = config.missing_fields();
    if !missing.is_empty() {
        return Err(InitializationError::MissingFields { fields: missing });
    }
    library.initialize_app(config)
}

pub fn auth_handle(
    client: &dyn BackendClient,
) -> Result<Arc<dyn IdentityService>, HandleAcquisitionError> {
    ensure_initialized(client, ServiceKind::Identity)?;
    client.identity()
}

pub fn document_store_handle(
    client: &dyn BackendClient,
) -> Result<Arc<dyn DocumentStore>, HandleAcquisitionError> {
    ensure_initialized(client, ServiceKind::DocumentStore)?;
    client.document_store()
}

pub fn object_store_handle(
    client: &dyn BackendClient,
) -> Result<Arc<dyn ObjectStore>, HandleAcquisitionError> {
    ensure_initialized(client, ServiceKind::ObjectStore)?;
    client.object_store()
}

fn ensure_initialized(
    client: &dyn BackendClient,
    service: ServiceKind,
) -> Result<(), HandleAcquisitionError> {
    if client.is_initialized() {
        Ok(())
    } else {
        Err(HandleAcquisitionError::NotInitialized { service })
    }
}

/// Initializes the client and derives all three handles. Any failure
/// discards whatever was acquired so far.
#[instrument(skip_all, fields(library = library.name(), project = config.project_id()))]
pub fn bootstrap(
    library: &dyn BackendLibrary,
    config: &ClientConfig,
) -> Result<BackendContext, BootstrapError> {
    let client = initialize(library, config)?;
    debug!("client initialized");

    let auth = auth_handle(client.as_ref())?;
    let document_store = document_store_handle(client.as_ref())?;
    let object_store = object_store_handle(client.as_ref())?;

    let context = BackendContext::new(library.name(), client, auth, document_store, object_store);
    info!(fingerprint = context.fingerprint(), "backend handles acquired");
    Ok(context)
}
