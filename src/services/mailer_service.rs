//! services/mailer_service.rs
//! Transporte de correo: trait `Mailer` y su implementación SMTP con lettre.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::{config::app_config::SmtpConfig, models::email_model::ComposedEmail};

/// Envío de emails ya compuestos. Se inyecta en `ContactService`.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    async fn send(&self, email: &ComposedEmail) -> Result<()>;

    /// Comprueba la conexión con el servidor.
    async fn verify(&self) -> Result<()>;
}

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Puerto 465 usa TLS implícito; cualquier otro, STARTTLS.
    pub fn from_config(cfg: &SmtpConfig) -> Result<Self> {
        let relay = if cfg.port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.host)
        };
        let mut builder = relay
            .with_context(|| format!("No se pudo configurar el relay SMTP {}", cfg.host))?
            .port(cfg.port);

        if let (Some(user), Some(pass)) = (&cfg.user, &cfg.pass) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        } else {
            log::warn!("SMTP_USER/SMTP_PASS no definidos, se envía sin autenticación");
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &ComposedEmail) -> Result<()> {
        let message = build_message(email)?;
        let response = self
            .transport
            .send(message)
            .await
            .context("El servidor SMTP rechazó el envío")?;
        log::info!(
            "Email '{}' enviado a {} ({})",
            email.subject,
            email.to,
            response.code()
        );
        Ok(())
    }

    async fn verify(&self) -> Result<()> {
        let ok = self
            .transport
            .test_connection()
            .await
            .context("No se pudo conectar al servidor SMTP")?;
        if ok {
            Ok(())
        } else {
            Err(anyhow!("El servidor SMTP no respondió al NOOP"))
        }
    }
}

/// Arma el mensaje MIME:
/// mixed? -> related -> (alternative(text, html), inline...)
pub fn build_message(email: &ComposedEmail) -> Result<Message> {
    let from: Mailbox = email
        .from
        .parse()
        .with_context(|| format!("Invalid from address: {}", email.from))?;
    let to: Mailbox = email
        .to
        .parse()
        .with_context(|| format!("Invalid recipient address: {}", email.to))?;

    let mut builder = Message::builder().from(from).to(to).subject(&email.subject);

    if let Some(reply_to) = &email.reply_to {
        match reply_to.parse::<Mailbox>() {
            Ok(mailbox) => builder = builder.reply_to(mailbox),
            Err(_) => log::warn!("Reply-To inválido, se omite: {}", reply_to),
        }
    }

    let alternative = MultiPart::alternative_plain_html(email.text.clone(), email.html.clone());

    let mut body = alternative;
    let mut inline = email.inline_attachments().peekable();
    if inline.peek().is_some() {
        let mut related = MultiPart::related().multipart(body);
        for attach in inline {
            let content_type = ContentType::parse(&attach.content_type)
                .with_context(|| format!("Content-Type inválido: {}", attach.content_type))?;
            let cid = attach.content_id.clone().unwrap_or_default();
            related = related.singlepart(
                Attachment::new_inline_with_name(cid, attach.filename.clone())
                    .body(attach.data.to_vec(), content_type),
            );
        }
        body = related;
    }

    let mut regular = email
        .attachments
        .iter()
        .filter(|a| a.content_id.is_none())
        .peekable();
    if regular.peek().is_some() {
        let mut mixed = MultiPart::mixed().multipart(body);
        for attach in regular {
            let content_type = ContentType::parse(&attach.content_type)
                .with_context(|| format!("Content-Type inválido: {}", attach.content_type))?;
            mixed = mixed.singlepart(
                Attachment::new(attach.filename.clone()).body(attach.data.to_vec(), content_type),
            );
        }
        body = mixed;
    }

    builder
        .multipart(body)
        .context("No se pudo construir el mensaje")
}
