//! models/error_model.rs
//! Errores que llegan al cliente HTTP y su forma `{error, message}`.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("tipo, nombre, mail, and mensaje are required")]
    MissingFields,

    #[error("tipo must be either \"canjea\" or \"forma\"")]
    InvalidTipo,

    #[error("El archivo es demasiado grande. Máximo 10MB por archivo.")]
    FileTooLarge,

    #[error("Se puede enviar un máximo de 10 fotos.")]
    TooManyFiles,

    #[error("Tipo de archivo no permitido. Solo se aceptan imágenes (JPEG, PNG, GIF, WEBP)")]
    InvalidFileType,

    #[error("{0}")]
    Upload(String),

    #[error("{0}")]
    InvalidBody(String),

    #[error("Not allowed by CORS")]
    CorsRejected,

    #[error("{0:#}")]
    SendFailed(anyhow::Error),
}

impl ContactError {
    /// Valor del campo `error` en la respuesta JSON.
    pub fn label(&self) -> &'static str {
        match self {
            ContactError::MissingFields => "Missing required fields",
            ContactError::InvalidTipo => "Invalid tipo",
            ContactError::FileTooLarge => "File too large",
            ContactError::TooManyFiles => "Too many files",
            ContactError::InvalidFileType => "File upload error",
            ContactError::Upload(_) => "Upload error",
            ContactError::InvalidBody(_) => "Invalid request body",
            ContactError::CorsRejected => "Something went wrong!",
            ContactError::SendFailed(_) => "Failed to send email",
        }
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::CorsRejected | ContactError::SendFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.label().to_string(),
            message: self.to_string(),
        })
    }
}
