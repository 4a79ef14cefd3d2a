//! tests/support.rs
//! Dobles de prueba y helpers para armar peticiones.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::{
    app::AppState,
    config::{app_config::DEFAULT_ALLOWED_ORIGINS, cors_config::CorsPolicy},
    models::email_model::ComposedEmail,
    services::{
        contact_service::ContactService, email_service::EmailComposer, mailer_service::Mailer,
        upload_service::UploadLimits,
    },
};

pub const BOUNDARY: &str = "----contactTestBoundary7MA4YWxkTrZu0gW";

/// Guarda los emails en lugar de enviarlos.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<ComposedEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<ComposedEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &ComposedEmail) -> Result<()> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }

    async fn verify(&self) -> Result<()> {
        Ok(())
    }
}

/// Simula un servidor SMTP caído.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: &ComposedEmail) -> Result<()> {
        Err(anyhow!("connection refused"))
    }

    async fn verify(&self) -> Result<()> {
        Err(anyhow!("connection refused"))
    }
}

pub fn test_state(mailer: Arc<dyn Mailer>) -> AppState {
    let composer = EmailComposer::new(
        "intercanjes@gmail.com".to_string(),
        "intercanjes@gmail.com".to_string(),
        None,
    );
    AppState {
        contact_service: ContactService::new(composer, mailer),
        upload_limits: UploadLimits::default(),
        cors_policy: CorsPolicy::with_default_pattern(
            DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        )
        .unwrap(),
    }
}

/// Archivo de prueba: (campo, nombre, content-type, contenido).
pub struct TestFile<'a> {
    pub field: &'a str,
    pub filename: &'a str,
    pub content_type: &'a str,
    pub data: Vec<u8>,
}

impl<'a> TestFile<'a> {
    pub fn png(filename: &'a str) -> Self {
        TestFile {
            field: "fotos",
            filename,
            content_type: "image/png",
            data: b"\x89PNG\r\n\x1a\nfake-image".to_vec(),
        }
    }
}

pub fn multipart_body(fields: &[(&str, &str)], files: &[TestFile<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    for file in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                file.field, file.filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.content_type).as_bytes());
        body.extend_from_slice(&file.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

pub const CANJEA_FIELDS: [(&str, &str); 6] = [
    ("tipo", "canjea"),
    ("nombre", "Ana Pérez"),
    ("mail", "ana@example.com"),
    ("mensaje", "Quiero canjear\nunas sillas"),
    ("empresa", "Muebles SRL"),
    ("ubicacion", "Córdoba"),
];
