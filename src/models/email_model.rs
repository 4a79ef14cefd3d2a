//! models/email_model.rs
//! Email compuesto y sus adjuntos, independientes de lettre.

use bytes::Bytes;

/// Adjunto de un email. Con `content_id` se embebe inline (`cid:`) en el HTML.
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
    pub content_id: Option<String>,
}

/// Email ya compuesto, independiente del transporte.
#[derive(Debug, Clone)]
pub struct ComposedEmail {
    pub from: String,
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
    pub attachments: Vec<EmailAttachment>,
}

impl ComposedEmail {
    /// Adjuntos que se referencian desde el HTML por content-id.
    pub fn inline_attachments(&self) -> impl Iterator<Item = &EmailAttachment> {
        self.attachments.iter().filter(|a| a.content_id.is_some())
    }
}
