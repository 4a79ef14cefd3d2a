//! services/upload_service.rs
//! Lectura de formularios multipart: campos de texto + fotos en memoria.

use actix_multipart::{Field, Multipart, MultipartError};
use bytes::{Bytes, BytesMut};
use futures_util::TryStreamExt;

use crate::models::{
    contact_model::{ContactForm, UploadedPhoto},
    error_model::ContactError,
};

/// Único campo que puede traer archivos.
pub const PHOTO_FIELD: &str = "fotos";

pub const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Límites del formulario multipart.
#[derive(Debug, Clone)]
pub struct UploadLimits {
    pub max_files: usize,
    pub max_file_size: usize,
    pub max_field_size: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        UploadLimits {
            max_files: 10,
            max_file_size: 10 * 1024 * 1024, // 10MB por archivo
            max_field_size: 1024 * 1024,
        }
    }
}

pub fn is_allowed_image(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(content_type))
}

fn upload_error(e: MultipartError) -> ContactError {
    ContactError::Upload(e.to_string())
}

/// Lee el cuerpo completo de una parte, cortando apenas supera `limit`.
/// `None` indica que el límite se superó.
async fn read_limited(field: &mut Field, limit: usize) -> Result<Option<Bytes>, ContactError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field.try_next().await.map_err(upload_error)? {
        if buf.len() + chunk.len() > limit {
            return Ok(None);
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(Some(buf.freeze()))
}

/// Consume el stream multipart y separa campos de texto y fotos.
/// Los límites se aplican en orden: cantidad, tipo (antes de leer el cuerpo) y tamaño.
pub async fn read_contact_multipart(
    mut payload: Multipart,
    limits: &UploadLimits,
) -> Result<(ContactForm, Vec<UploadedPhoto>), ContactError> {
    let mut form = ContactForm::default();
    let mut fotos: Vec<UploadedPhoto> = Vec::new();

    while let Some(mut field) = payload.try_next().await.map_err(upload_error)? {
        let disposition = field.content_disposition().clone();
        let name = disposition.get_name().unwrap_or_default().to_string();

        match disposition.get_filename() {
            Some(filename) => {
                if name != PHOTO_FIELD {
                    return Err(ContactError::Upload(format!("Unexpected field: {name}")));
                }

                // input file vacío del navegador: filename="" sin contenido
                if filename.is_empty() {
                    let _ = read_limited(&mut field, limits.max_file_size).await?;
                    continue;
                }

                if fotos.len() >= limits.max_files {
                    return Err(ContactError::TooManyFiles);
                }

                let content_type = field
                    .content_type()
                    .map(|m| m.essence_str().to_ascii_lowercase())
                    .unwrap_or_default();
                if !is_allowed_image(&content_type) {
                    log::warn!(
                        "Archivo rechazado '{}' con tipo '{}'",
                        filename,
                        content_type
                    );
                    return Err(ContactError::InvalidFileType);
                }

                let data = read_limited(&mut field, limits.max_file_size)
                    .await?
                    .ok_or(ContactError::FileTooLarge)?;

                log::debug!(
                    "Foto recibida '{}' ({} bytes, {})",
                    filename,
                    data.len(),
                    content_type
                );
                fotos.push(UploadedPhoto {
                    filename: filename.to_string(),
                    content_type,
                    data,
                });
            }
            None => {
                let data = read_limited(&mut field, limits.max_field_size)
                    .await?
                    .ok_or_else(|| ContactError::Upload(format!("Field value too long: {name}")))?;
                let value = String::from_utf8(data.to_vec())
                    .map_err(|_| ContactError::Upload(format!("Invalid UTF-8 in field: {name}")))?;

                if !form.set_field(&name, value) {
                    log::debug!("Campo multipart ignorado: {}", name);
                }
            }
        }
    }

    Ok((form, fotos))
}
