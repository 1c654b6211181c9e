//! Domain-level building blocks shared by the bootstrap, backend and API
//! crates: the client configuration record, capability traits, and the
//! telemetry wiring every binary installs first.

pub mod backend;
pub mod config;
pub mod model;
pub mod services;

pub use backend::*;
pub use config::{ApiConfig, ClientConfig, ClientConfigBuilder, ConfigError};
pub use model::*;
