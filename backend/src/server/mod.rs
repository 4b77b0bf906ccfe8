//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, StartupError, build_http_state};

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{Method, header};
use actix_web::middleware::NormalizePath;
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::TRACE_ID_HEADER;
use crate::inbound::http::error::route_not_found;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::superheroes;
use crate::middleware::{Diagnostics, Trace};
use crate::settings::Mode;

const CORS_MAX_AGE_SECS: usize = 3600;

fn cors_for(mode: Mode, allowed_origins: &[String]) -> Cors {
    match mode {
        Mode::Development => Cors::permissive(),
        Mode::Production => allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allowed_headers([header::CONTENT_TYPE, header::ACCEPT])
            .expose_headers([TRACE_ID_HEADER])
            .max_age(CORS_MAX_AGE_SECS),
    }
}

/// Everything [`build_app`] needs per worker.
#[derive(Clone)]
pub struct AppDependencies {
    /// Health check state.
    pub health_state: web::Data<HealthState>,
    /// Handler ports.
    pub http_state: web::Data<HttpState>,
    /// Deployment mode.
    pub mode: Mode,
    /// CORS origins honoured in production.
    pub allowed_origins: Vec<String>,
}

/// Assemble the application: catalogue routes, health checks, docs and middleware.
///
/// Middleware runs outermost first: path normalisation, CORS, trace id,
/// then error detail.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        mode,
        allowed_origins,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .configure(superheroes::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(route_not_found))
        .wrap(Diagnostics::new(mode.error_detail()))
        .wrap(Trace)
        .wrap(cors_for(mode, &allowed_origins))
        .wrap(NormalizePath::trim())
}

/// Construct an Actix HTTP server over prepared handler state.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        mode,
        allowed_origins,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            mode,
            allowed_origins: allowed_origins.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
