//! Superhero catalogue records and their validation rules.
//!
//! The server and the client both depend on this crate so that a draft is
//! judged by exactly one rule set. [`validate_draft`] reports every
//! violation, which suits form feedback; [`first_violation`] stops at the
//! first one, which is what the HTTP API reports.

mod record;
mod validation;

pub use record::{Superhero, SuperheroDraft, SuperheroId, SuperheroIdError};
pub use validation::{
    CATCH_PHRASE_MAX, Field, NICKNAME_MAX, NICKNAME_MIN, ORIGIN_DESCRIPTION_MAX, REAL_NAME_MAX,
    REAL_NAME_MIN, Violation, first_violation, validate_draft,
};
