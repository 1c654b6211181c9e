use actix_web::{middleware::Logger, web, App, HttpServer};
use baas_bootstrap::{publish_global, BackendContext, BootstrapError};
use baas_domain::backend::BackendLibrary;
use baas_domain::config::{ApiConfig, ClientConfig, ConfigError};
use baas_domain::services::telemetry::{init_telemetry, TelemetryConfig, TelemetryError};
use baas_local::LocalBackend;
use thiserror::Error;
use tracing::{error, info};

use crate::{
    handlers::{metrics_handler, service_status_handler, services_handler},
    state::AppState,
};

pub async fn run() -> Result<(), StartupError> {
    let config = ApiConfig::load_from_env()?;

    let telemetry_config = TelemetryConfig::from_env("API");
    let telemetry = init_telemetry(&telemetry_config)?;

    let client_config = ClientConfig::load_from_env()?;
    let backend = publish_backend(&LocalBackend::new(), &client_config);

    let state = AppState::new(backend, telemetry);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .configure(routes)
    })
    .bind(config.api_bind_address())?;

    info!(address = config.api_bind_address(), "api listening");
    server.run().await?;

    Ok(())
}

/// Publishes the process-wide handles. A failure does not stop the server:
/// it is logged once here and every backend route answers 503 afterwards.
pub fn publish_backend(
    library: &dyn BackendLibrary,
    config: &ClientConfig,
) -> Result<BackendContext, BootstrapError> {
    match publish_global(library, config) {
        Ok(context) => {
            info!(
                project = context.project_id(),
                library = context.library(),
                "backend handles published"
            );
            Ok(context.clone())
        }
        Err(err) => {
            error!(error = %err, "backend unavailable; identity, document and object storage are disabled");
            Err(err)
        }
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/services", web::get().to(services_handler))
        .route("/api/v1/services/{kind}", web::get().to(service_status_handler))
        .route("/metrics", web::get().to(metrics_handler));
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
