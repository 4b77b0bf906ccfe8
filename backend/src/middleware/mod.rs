//! Request middleware.
//!
//! - [`Trace`]: request-scoped correlation identifier
//! - [`Diagnostics`]: how much failure detail responses reveal

pub mod diagnostics;
pub mod trace;

pub use diagnostics::{Diagnostics, ErrorDetail};
pub use trace::Trace;
