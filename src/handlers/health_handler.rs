//! handlers/health_handler.rs

use actix_web::HttpResponse;
use serde_json::json;

use crate::models::contact_model::HealthResponse;

/// GET /health
pub async fn health_endpoint() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: "Server is running".to_string(),
    })
}

/// Cualquier ruta no registrada.
pub async fn not_found_endpoint() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": "Not Found" }))
}
