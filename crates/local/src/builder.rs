use std::collections::HashSet;

use baas_domain::model::ServiceKind;

use crate::LocalBackend;

#[derive(Default)]
pub struct LocalBackendBuilder {
    unavailable_reason: Option<String>,
    disabled: HashSet<ServiceKind>,
}

impl LocalBackendBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `initialize_app` call fail as if the library were absent.
    pub fn unavailable(mut self, reason: impl Into<String>) -> Self {
        self.unavailable_reason = Some(reason.into());
        self
    }

    /// Withholds one capability from clients created by this library.
    pub fn disable(mut self, service: ServiceKind) -> Self {
        self.disabled.insert(service);
        self
    }

    pub fn build(self) -> LocalBackend {
        LocalBackend::from_parts(self.unavailable_reason, self.disabled)
    }
}
