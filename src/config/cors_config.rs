//! config/cors_config.rs
//! Política CORS: lista de orígenes exactos más patrones de subdominio.

use actix_cors::Cors;
use actix_web::http::header::{self, HeaderMap};
use anyhow::{Context, Result};
use regex::Regex;

/// Cualquier subdominio (o el dominio raíz) de intercanjes.com, http o https.
pub const DEFAULT_ORIGIN_PATTERN: &str = r"^https?://(?:.+\.)?intercanjes\.com$";

#[derive(Debug, Clone)]
pub struct CorsPolicy {
    origins: Vec<String>,
    patterns: Vec<Regex>,
}

impl CorsPolicy {
    pub fn new(origins: Vec<String>, patterns: &[&str]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("Patrón de origen inválido: {p}")))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { origins, patterns })
    }

    /// Política por defecto del servicio: los orígenes configurados + el comodín.
    pub fn with_default_pattern(origins: Vec<String>) -> Result<Self> {
        Self::new(origins, &[DEFAULT_ORIGIN_PATTERN])
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.origins.iter().any(|o| o == origin) || self.patterns.iter().any(|re| re.is_match(origin))
    }

    /// Peticiones sin cabecera Origin (curl, server-to-server) siempre pasan.
    pub fn allows_request(&self, headers: &HeaderMap) -> bool {
        match headers.get(header::ORIGIN) {
            None => true,
            Some(value) => match value.to_str() {
                Ok(origin) => {
                    let allowed = self.is_allowed(origin);
                    if !allowed {
                        log::warn!("CORS blocked Origin: {}", origin);
                    }
                    allowed
                }
                Err(_) => {
                    log::warn!("CORS blocked Origin no legible");
                    false
                }
            },
        }
    }

    /// Middleware de actix-cors que añade las cabeceras para los orígenes válidos.
    pub fn build_cors(&self) -> Cors {
        let policy = self.clone();
        Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                origin
                    .to_str()
                    .map(|o| policy.is_allowed(o))
                    .unwrap_or(false)
            })
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
            .supports_credentials()
            .max_age(3600)
    }
}
