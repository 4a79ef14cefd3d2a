//! services/mod.rs
//! Módulo que agrupa distintos "servicios" o "capas de negocio" de la app.

pub mod contact_service;
pub mod email_service;
pub mod mailer_service;
pub mod upload_service;
pub mod validation_service;
