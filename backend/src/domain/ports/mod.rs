//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod superhero_catalogue;
mod superhero_repository;

#[cfg(test)]
pub use superhero_catalogue::MockSuperheroCatalogue;
pub use superhero_catalogue::SuperheroCatalogue;
#[cfg(test)]
pub use superhero_repository::MockSuperheroRepository;
pub use superhero_repository::{SuperheroRepository, SuperheroRepositoryError};
