//! Failures surfaced by the client.

use pagination::PaginationError;
use superhero_model::Violation;

/// Errors returned by [`crate::SuperheroApi`] and [`crate::HeroStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The request was rejected locally before anything was sent.
    #[error("{}", first_message(.0))]
    Validation(Vec<Violation>),
    /// The server answered with a failure status.
    #[error("{message}")]
    Request {
        /// HTTP status code.
        status: u16,
        /// Message from the failure envelope, or a generic fallback.
        message: String,
        /// Field violations from the failure envelope.
        violations: Vec<Violation>,
    },
    /// The server could not be reached.
    #[error("{0}")]
    Transport(String),
    /// A success response did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

fn first_message(violations: &[Violation]) -> &str {
    violations
        .first()
        .map_or("Validation failed", |violation| violation.message.as_str())
}

impl ClientError {
    /// Field-level violations, empty for transport and decode failures.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Validation(violations) | Self::Request { violations, .. } => violations,
            Self::Transport(_) | Self::Decode(_) => &[],
        }
    }

    /// HTTP status for server-side failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<PaginationError> for ClientError {
    fn from(err: PaginationError) -> Self {
        Self::Validation(vec![Violation::new(err.field().as_str(), err.to_string())])
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
