//! config/app_config.rs
//! Configuración del servicio leída desde variables de entorno (.env incluido).

use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_MAILBOX: &str = "intercanjes@gmail.com";
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Orígenes permitidos cuando no se define ALLOWED_ORIGINS.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "https://intercanjes.com",
    "https://api.intercanjes.com",
    "https://www.intercanjes.com",
];

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub pass: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub smtp: SmtpConfig,
    pub email_from: String,
    pub email_to: String,
    pub allowed_origins: Vec<String>,
    pub assets_dir: PathBuf,
}

impl AppConfig {
    /// Lee la configuración del proceso. Llamar después de `dotenv()`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Igual que `from_env`, pero con una fuente de variables inyectable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Variables vacías cuentan como no definidas
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT inválido: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let smtp_port = match get("SMTP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("SMTP_PORT inválido: {raw}"))?,
            None => DEFAULT_SMTP_PORT,
        };

        let allowed_origins = match get("ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|o| o.trim().trim_end_matches('/').to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            None => DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
        };

        Ok(AppConfig {
            port,
            smtp: SmtpConfig {
                host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                port: smtp_port,
                user: get("SMTP_USER"),
                pass: get("SMTP_PASS"),
            },
            email_from: get("EMAIL_FROM").unwrap_or_else(|| DEFAULT_MAILBOX.to_string()),
            email_to: get("EMAIL_TO").unwrap_or_else(|| DEFAULT_MAILBOX.to_string()),
            allowed_origins,
            assets_dir: get("ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR)),
        })
    }
}
