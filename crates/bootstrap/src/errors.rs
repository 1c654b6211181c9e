use baas_domain::backend::{HandleAcquisitionError, InitializationError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    #[error("initialization failed: {0}")]
    Initialization(#[from] InitializationError),
    #[error("handle acquisition failed: {0}")]
    HandleAcquisition(#[from] HandleAcquisitionError),
}

impl BootstrapError {
    /// Metric label for the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            BootstrapError::Initialization(InitializationError::ConflictingConfiguration {
                ..
            }) => "conflict",
            BootstrapError::Initialization(_) => "initialization",
            BootstrapError::HandleAcquisition(_) => "handle_acquisition",
        }
    }
}

/// Returned to dependents that ask for a handle before bootstrap succeeded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("`{name}` is unavailable: backend bootstrap has not completed")]
pub struct ServiceUnavailable {
    pub name: &'static str,
}
