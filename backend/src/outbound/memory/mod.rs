//! In-process adapters for running without external infrastructure.

mod superhero_repository;

pub use superhero_repository::InMemorySuperheroRepository;
