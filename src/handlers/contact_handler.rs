//! handlers/contact_handler.rs
//! POST /api/contact: JSON, urlencoded o multipart con fotos.

use actix_multipart::Multipart;
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use bytes::BytesMut;
use futures_util::StreamExt;

use crate::{
    models::{
        contact_model::{ContactForm, ContactResponse, UploadedPhoto},
        error_model::ContactError,
    },
    services::{
        contact_service::ContactService,
        upload_service::{read_contact_multipart, UploadLimits},
        validation_service::validate_submission,
    },
};

/// Tope para cuerpos JSON/urlencoded.
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

/// POST /api/contact
pub async fn contact_endpoint(
    req: HttpRequest,
    payload: web::Payload,
    contact_service: web::Data<ContactService>,
    limits: web::Data<UploadLimits>,
) -> Result<HttpResponse, ContactError> {
    let (form, fotos) = read_contact_form(&req, payload, &limits).await?;
    let submission = validate_submission(form, fotos)?;

    let fotos_enviadas = contact_service.send_contact(submission).await?;

    Ok(HttpResponse::Ok().json(ContactResponse {
        success: true,
        message: "Email sent successfully".to_string(),
        fotos_enviadas,
    }))
}

/// Tipo MIME sin parámetros, en minúsculas.
fn content_type_essence(req: &HttpRequest) -> String {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .unwrap_or_default()
}

async fn read_contact_form(
    req: &HttpRequest,
    payload: web::Payload,
    limits: &UploadLimits,
) -> Result<(ContactForm, Vec<UploadedPhoto>), ContactError> {
    let essence = content_type_essence(req);

    if essence == "multipart/form-data" {
        let multipart = Multipart::new(req.headers(), payload);
        return read_contact_multipart(multipart, limits).await;
    }

    let form = if essence == "application/json" || essence.ends_with("+json") {
        let body = read_body(payload, MAX_BODY_SIZE).await?;
        if body.is_empty() {
            ContactForm::default()
        } else {
            serde_json::from_slice(&body)
                .map_err(|e| ContactError::InvalidBody(format!("Invalid JSON: {e}")))?
        }
    } else if essence == "application/x-www-form-urlencoded" {
        let body = read_body(payload, MAX_BODY_SIZE).await?;
        serde_urlencoded::from_bytes(&body)
            .map_err(|e| ContactError::InvalidBody(format!("Invalid form body: {e}")))?
    } else {
        // Sin cuerpo reconocible: la validación responde "Missing required fields"
        log::debug!("Content-Type no soportado en /api/contact: '{}'", essence);
        ContactForm::default()
    };

    Ok((form, Vec::new()))
}

async fn read_body(mut payload: web::Payload, limit: usize) -> Result<BytesMut, ContactError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| ContactError::InvalidBody(e.to_string()))?;
        if body.len() + chunk.len() > limit {
            return Err(ContactError::InvalidBody("Request body too large".to_string()));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
