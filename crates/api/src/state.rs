use baas_bootstrap::{BackendContext, BootstrapError};
use baas_domain::services::telemetry::TelemetryGuard;

/// Shared handler state. The backend slot holds either the published
/// context or the reason bootstrap failed, so handlers can report the
/// outage instead of touching a missing handle.
#[derive(Clone)]
pub struct AppState {
    backend: Result<BackendContext, BootstrapError>,
    telemetry: TelemetryGuard,
}

impl AppState {
    pub fn new(
        backend: Result<BackendContext, BootstrapError>,
        telemetry: TelemetryGuard,
    ) -> Self {
        Self { backend, telemetry }
    }

    pub fn backend(&self) -> Result<&BackendContext, &BootstrapError> {
        self.backend.as_ref()
    }

    pub fn telemetry(&self) -> &TelemetryGuard {
        &self.telemetry
    }
}
