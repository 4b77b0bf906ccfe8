//! Backend entry-point: loads settings, prepares storage and serves the API.

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::server::{ServerConfig, build_http_state, create_server};
use backend::settings::ServerSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let config = ServerConfig::from_settings(&settings).map_err(std::io::Error::other)?;
    let http_state = build_http_state(&settings)
        .await
        .map_err(std::io::Error::other)?;

    info!(addr = %config.bind_addr(), mode = %config.mode(), "starting superhero backend");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, web::Data::new(http_state), config)?;
    server.await
}
