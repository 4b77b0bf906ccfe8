//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see the driving port, so
//! they stay testable without storage.

use std::sync::Arc;

use crate::domain::ports::SuperheroCatalogue;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Catalogue use cases.
    pub superheroes: Arc<dyn SuperheroCatalogue>,
}

impl HttpState {
    /// Wrap the catalogue port.
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::SuperheroCatalogueService;
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::memory::InMemorySuperheroRepository;
    ///
    /// let service = SuperheroCatalogueService::new(Arc::new(InMemorySuperheroRepository::new()));
    /// let state = HttpState::new(Arc::new(service));
    /// let _port = state.superheroes.clone();
    /// ```
    #[must_use]
    pub fn new(superheroes: Arc<dyn SuperheroCatalogue>) -> Self {
        Self { superheroes }
    }
}
