//! app.rs
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error,
};

use crate::{
    config::cors_config::CorsPolicy,
    handlers::{contact_handler, health_handler},
    models::error_model::ContactError,
    services::{contact_service::ContactService, upload_service::UploadLimits},
};

/// Estado compartido (solo lectura) entre workers.
#[derive(Clone)]
pub struct AppState {
    pub contact_service: ContactService,
    pub upload_limits: UploadLimits,
    pub cors_policy: CorsPolicy,
}

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_handler::health_endpoint))
        .service(
            web::resource(["/api/contact", "/api/contact/"])
                .route(web::post().to(contact_handler::contact_endpoint))
                .default_service(web::to(health_handler::not_found_endpoint)),
        )
        .default_service(web::to(health_handler::not_found_endpoint));
}

/// App completa con middlewares. La usan `main` y los tests.
///
/// Orden de ejecución: Logger -> bloqueo CORS -> cabeceras CORS -> rutas.
pub fn build_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let guard_policy = state.cors_policy.clone();

    App::new()
        .app_data(web::Data::new(state.contact_service.clone()))
        .app_data(web::Data::new(state.upload_limits.clone()))
        .configure(init_app)
        .wrap(state.cors_policy.build_cors())
        .wrap_fn(move |req, srv| {
            // Origen no permitido: no llega a ningún handler
            let outcome = if guard_policy.allows_request(req.headers()) {
                Ok(srv.call(req))
            } else {
                Err(req.error_response(ContactError::CorsRejected))
            };
            async move {
                match outcome {
                    Ok(fut) => fut.await.map(ServiceResponse::map_into_left_body),
                    Err(res) => Ok(res.map_into_right_body()),
                }
            }
        })
        .wrap(Logger::default())
}
