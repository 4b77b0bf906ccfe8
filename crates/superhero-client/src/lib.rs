//! Client side of the superhero catalogue.
//!
//! - [`SuperheroApi`] / [`HttpSuperheroApi`]: typed REST access with local
//!   validation
//! - [`HeroStore`]: the current page and the rules for moving between pages
//! - [`HeroForm`] and [`views`]: input handling and text rendering for the
//!   `heroes` CLI

pub mod api;
mod error;
pub mod form;
pub mod store;
pub mod views;

pub use api::{HttpSuperheroApi, SuperheroApi};
pub use error::ClientError;
pub use form::HeroForm;
pub use store::HeroStore;
