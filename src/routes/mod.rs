//! Actix-web handlers and the helpers they share.

use actix_web::HttpResponse;
use log::error;
use serde_json::json;

use crate::services::ServiceError;

pub mod member;

/// Maps a service failure onto an HTTP response with a JSON `error` body.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        ServiceError::InvalidPageRequest(_) => HttpResponse::BadRequest().json(body),
        ServiceError::StoreUnavailable(_) => {
            error!("Store unavailable: {err}");
            HttpResponse::ServiceUnavailable().json(body)
        }
        ServiceError::Timeout => {
            error!("Search exceeded its deadline");
            HttpResponse::GatewayTimeout().json(body)
        }
        ServiceError::Repository(_) | ServiceError::Internal(_) => {
            error!("Failed to search members: {err}");
            HttpResponse::InternalServerError().json(json!({ "error": "internal error" }))
        }
    }
}
