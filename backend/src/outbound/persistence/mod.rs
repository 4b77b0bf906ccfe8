//! PostgreSQL persistence using Diesel with `diesel-async` and bb8 pooling.
//!
//! Row structs (`models`) and table definitions (`schema`) stay private to
//! this module; only the repository, the pool and the migration runner are
//! exported.
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselSuperheroRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/heroes")).await?;
//! let repo = DieselSuperheroRepository::new(pool);
//! ```

mod diesel_superhero_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_superhero_repository::DieselSuperheroRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
