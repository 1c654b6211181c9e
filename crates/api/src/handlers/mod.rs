pub mod metrics;
pub mod services;

pub use metrics::metrics_handler;
pub use services::{service_status_handler, services_handler};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use baas_domain::model::ServiceKind;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unknown service `{0}`")]
    UnknownService(String),
    #[error("{service} service unavailable: {reason}")]
    ServiceUnavailable { service: ServiceKind, reason: String },
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UnknownService(_) => StatusCode::NOT_FOUND,
            ApiError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
