//! services/contact_service.rs
//! Orquesta el envío: compone el email del formulario y lo entrega al `Mailer`.

use std::sync::Arc;

use chrono::Utc;

use crate::{
    models::{contact_model::ContactSubmission, error_model::ContactError},
    services::{email_service::EmailComposer, mailer_service::Mailer},
};

#[derive(Clone)]
pub struct ContactService {
    composer: EmailComposer,
    mailer: Arc<dyn Mailer>,
}

impl ContactService {
    pub fn new(composer: EmailComposer, mailer: Arc<dyn Mailer>) -> Self {
        Self { composer, mailer }
    }

    /// Envía el formulario. Devuelve la cantidad de fotos adjuntadas.
    pub async fn send_contact(&self, submission: ContactSubmission) -> Result<usize, ContactError> {
        let fotos = submission.fotos.len();
        let email = self.composer.compose(&submission, Utc::now());

        log::info!(
            "Enviando contacto tipo={} con {} foto(s) y {} adjunto(s)",
            submission.tipo,
            fotos,
            email.attachments.len()
        );

        self.mailer.send(&email).await.map_err(|e| {
            log::error!("Error sending email: {:#}", e);
            ContactError::SendFailed(e)
        })?;

        Ok(fotos)
    }
}
