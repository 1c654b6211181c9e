use std::str::FromStr;

use actix_web::{web, HttpResponse};
use baas_domain::model::ServiceKind;
use metrics::counter;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::AsRefStr;

use crate::state::AppState;

use super::ApiError;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Availability {
    Available,
    Unavailable,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceStatus {
    pub service: ServiceKind,
    pub handle: String,
    pub status: Availability,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServicesResponse {
    pub status: Availability,
    pub project_id: Option<String>,
    pub library: Option<String>,
    pub services: Vec<ServiceStatus>,
    pub error: Option<String>,
}

fn statuses(status: Availability) -> Vec<ServiceStatus> {
    ServiceKind::iter()
        .map(|service| ServiceStatus {
            service,
            handle: service.handle_name().to_string(),
            status,
        })
        .collect()
}

pub async fn services_handler(state: web::Data<AppState>) -> HttpResponse {
    match state.backend() {
        Ok(context) => {
            counter!("api_service_status_requests_total", "status" => "available").increment(1);
            HttpResponse::Ok().json(ServicesResponse {
                status: Availability::Available,
                project_id: Some(context.project_id().to_string()),
                library: Some(context.library().to_string()),
                services: statuses(Availability::Available),
                error: None,
            })
        }
        Err(err) => {
            counter!("api_service_status_requests_total", "status" => "unavailable").increment(1);
            HttpResponse::ServiceUnavailable().json(ServicesResponse {
                status: Availability::Unavailable,
                project_id: None,
                library: None,
                services: statuses(Availability::Unavailable),
                error: Some(err.to_string()),
            })
        }
    }
}

pub async fn service_status_handler(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let raw = path.into_inner();
    let service = ServiceKind::from_str(&raw).map_err(|_| ApiError::UnknownService(raw))?;

    state.backend().map_err(|err| {
        counter!("api_service_status_requests_total", "status" => "unavailable").increment(1);
        ApiError::ServiceUnavailable {
            service,
            reason: err.to_string(),
        }
    })?;

    counter!("api_service_status_requests_total", "status" => "available").increment(1);
    Ok(HttpResponse::Ok().json(ServiceStatus {
        service,
        handle: service.handle_name().to_string(),
        status: Availability::Available,
    }))
}
