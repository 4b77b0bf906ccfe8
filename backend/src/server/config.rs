//! HTTP server configuration object and storage wiring.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::SuperheroCatalogueService;
use crate::domain::ports::{SuperheroRepository, SuperheroRepositoryError};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemorySuperheroRepository;
use crate::outbound::persistence::{
    DbPool, DieselSuperheroRepository, MigrationError, PoolConfig, PoolError,
    run_pending_migrations,
};
use crate::seed::seed;
use crate::settings::{Mode, ServerSettings, SettingsError};

/// Failures that stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Settings could not be interpreted.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// Migrations could not be applied.
    #[error(transparent)]
    Migration(#[from] MigrationError),
    /// The connection pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// Seeding failed.
    #[error("seeding failed: {0}")]
    Seed(#[from] SuperheroRepositoryError),
}

/// Listener and middleware configuration for [`super::create_server`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) mode: Mode,
    pub(crate) allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Configuration for `bind_addr` in `mode` with no extra CORS origins.
    #[must_use]
    pub const fn new(bind_addr: SocketAddr, mode: Mode) -> Self {
        Self {
            bind_addr,
            mode,
            allowed_origins: Vec::new(),
        }
    }

    /// Derive the configuration from loaded settings.
    ///
    /// # Errors
    /// Returns [`SettingsError`] for an invalid host or mode.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, SettingsError> {
        Ok(Self::new(settings.bind_addr()?, settings.mode()?)
            .with_allowed_origins(settings.allowed_origins()))
    }

    /// Origins accepted by CORS in production.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Deployment mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }
}

async fn catalogue_over<R>(repository: R, seed_first: bool) -> Result<HttpState, StartupError>
where
    R: SuperheroRepository + 'static,
{
    if seed_first {
        seed(&repository).await?;
    }
    let service = SuperheroCatalogueService::new(Arc::new(repository));
    Ok(HttpState::new(Arc::new(service)))
}

/// Build handler state over PostgreSQL when a database URL is configured,
/// otherwise over an in-memory store.
///
/// # Errors
/// Returns [`StartupError`] when migrations, pooling or seeding fail.
pub async fn build_http_state(settings: &ServerSettings) -> Result<HttpState, StartupError> {
    match settings.database_url() {
        Some(url) => {
            let applied = run_pending_migrations(url).await?;
            info!(applied, "database migrations applied");
            let pool =
                DbPool::new(PoolConfig::new(url).with_max_size(settings.db_pool_size())).await?;
            catalogue_over(DieselSuperheroRepository::new(pool), settings.seed).await
        }
        None => {
            warn!("no database URL configured; records are kept in memory");
            catalogue_over(InMemorySuperheroRepository::new(), settings.seed).await
        }
    }
}
