use std::io;
use std::sync::Arc;

use actix_web::HttpServer;
use dotenv::dotenv;

use crate::app::{build_app, AppState};
use crate::config::app_config::AppConfig;
use crate::config::cors_config::CorsPolicy;
use crate::logger::init_logger;
use crate::services::contact_service::ContactService;
use crate::services::email_service::{load_logo, EmailComposer};
use crate::services::mailer_service::{Mailer, SmtpMailer};
use crate::services::upload_service::UploadLimits;

mod app;
mod config;
mod handlers;
mod logger;
mod models;
mod services;

#[cfg(test)]
mod tests;

fn startup_error(e: anyhow::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{e:#}"))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    let config = AppConfig::from_env().map_err(startup_error)?;

    // Logo del email: opcional
    let logo = match load_logo(&config.assets_dir).await {
        Ok(Some(logo)) => {
            log::info!("Logo cargado: {}", logo.filename);
            Some(logo)
        }
        Ok(None) => {
            log::warn!(
                "No se encontró logo en {}, el email se envía sin cabecera",
                config.assets_dir.display()
            );
            None
        }
        Err(e) => {
            log::warn!("Error leyendo el logo: {:#}", e);
            None
        }
    };

    let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::from_config(&config.smtp).map_err(startup_error)?);

    // Verificar SMTP sin bloquear el arranque
    let verify_mailer = mailer.clone();
    tokio::spawn(async move {
        match verify_mailer.verify().await {
            Ok(()) => log::info!("Server is ready to send messages"),
            Err(e) => log::error!("Error en configuración de email: {:#}", e),
        }
    });

    let composer = EmailComposer::new(config.email_from.clone(), config.email_to.clone(), logo);
    let state = AppState {
        contact_service: ContactService::new(composer, mailer),
        upload_limits: UploadLimits::default(),
        cors_policy: CorsPolicy::with_default_pattern(config.allowed_origins.clone())
            .map_err(startup_error)?,
    };

    log::info!("Server is running on port {}", config.port);
    HttpServer::new(move || build_app(state.clone()))
        .workers(1)
        .bind(("0.0.0.0", config.port))?
        .run()
        .await
}
