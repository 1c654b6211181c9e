//! Bootstrap and publication of backend handles.
//!
//! [`bootstrap`] turns a [`ClientConfig`](baas_domain::ClientConfig) into a
//! complete [`BackendContext`] or fails without handing anything out. The
//! context is meant to be passed explicitly to every component that needs
//! backend access; [`Publisher`] (and the process-wide [`global`] instance)
//! exists for code that can only discover it by name.

mod context;
mod errors;
mod operations;
mod publisher;

pub use context::{BackendContext, PublishedHandle};
pub use errors::{BootstrapError, ServiceUnavailable};
pub use operations::{
    auth_handle, bootstrap, document_store_handle, initialize, object_store_handle,
};
pub use publisher::{global, publish_global, published, Publisher};
