//! Domain-level failure type.
//!
//! Errors stay transport agnostic. The HTTP adapter turns them into the JSON
//! failure envelope and picks a status from [`ErrorCode`].

use std::fmt;

use serde::{Deserialize, Serialize};
use superhero_model::Violation;

use super::TraceId;

/// Stable machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested record does not exist.
    NotFound,
    /// Storage or another collaborator failed.
    InternalError,
}

impl ErrorCode {
    /// Wire name of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::NotFound => "not_found",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure raised by the catalogue and its adapters.
///
/// The trace identifier in scope at construction is captured automatically.
/// `causes` records the chain of underlying errors, outermost first; it is
/// only ever shown to clients in development mode.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Superhero not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert!(err.violations().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    violations: Vec<Violation>,
    causes: Vec<String>,
}

impl Error {
    /// Create an error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            violations: Vec::new(),
            causes: Vec::new(),
        }
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Validation failure carrying the offending field.
    ///
    /// The violation's message becomes the error message.
    ///
    /// ```
    /// use backend::domain::Error;
    /// use superhero_model::Violation;
    ///
    /// let err = Error::validation(Violation::new("nickname", "Nickname is required"));
    /// assert_eq!(err.message(), "Nickname is required");
    /// assert_eq!(err.violations().len(), 1);
    /// ```
    pub fn validation(violation: Violation) -> Self {
        let message = violation.message.clone();
        Self::invalid_request(message).with_violations(vec![violation])
    }

    /// Override the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach field-level violations.
    #[must_use]
    pub fn with_violations(mut self, violations: Vec<Violation>) -> Self {
        self.violations = violations;
        self
    }

    /// Record `source` and everything it wraps as the cause chain.
    #[must_use]
    pub fn caused_by(mut self, source: &(dyn std::error::Error + 'static)) -> Self {
        let mut next = Some(source);
        while let Some(err) = next {
            self.causes.push(err.to_string());
            next = err.source();
        }
        self
    }

    /// Stable machine-readable failure category.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Trace identifier captured at construction, if any.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Field-level violations, empty unless validation failed.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Underlying errors, outermost first.
    #[must_use]
    pub fn causes(&self) -> &[String] {
        &self.causes
    }

    /// Multi-line rendering of the error and its causes.
    ///
    /// ```
    /// use backend::domain::Error;
    ///
    /// let err = Error::internal("Failed to load superheroes");
    /// assert_eq!(err.stack(), "internal_error: Failed to load superheroes");
    /// ```
    #[must_use]
    pub fn stack(&self) -> String {
        let mut out = format!("{}: {}", self.code, self.message);
        for cause in &self.causes {
            out.push_str("\n    caused by: ");
            out.push_str(cause);
        }
        out
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
