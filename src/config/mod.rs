//! config/mod.rs
//! Configuración del servicio: entorno y política CORS.

pub mod app_config;
pub mod cors_config;
