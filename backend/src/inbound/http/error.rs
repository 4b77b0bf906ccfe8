//! HTTP mapping for domain errors.
//!
//! Every failure leaves the server as the same JSON envelope:
//! `{success: false, code, message, traceId?, errors?, stack?}`. How much of
//! it is filled in depends on the request's [`ErrorDetail`].

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use serde::{Deserialize, Serialize};
use superhero_model::Violation;
use tracing::{debug, warn};
use utoipa::ToSchema;

use super::schemas::{ErrorCodeSchema, ViolationSchema};
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use crate::middleware::ErrorDetail;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message substituted for internal errors when detail is redacted.
pub const REDACTED_MESSAGE: &str = "Internal Server Error";

/// Failure body returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable category.
    #[schema(value_type = ErrorCodeSchema)]
    pub code: ErrorCode,
    /// Human-readable explanation.
    pub message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Field-level violations for validation failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(value_type = Vec<ViolationSchema>)]
    pub errors: Vec<Violation>,
    /// Error and cause chain, present only with verbose detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorEnvelope {
    /// Build the envelope for `error` at the given detail level.
    #[must_use]
    pub fn from_error(error: &Error, detail: ErrorDetail) -> Self {
        let verbose = detail == ErrorDetail::Verbose;
        let message = if !verbose && error.code() == ErrorCode::InternalError {
            REDACTED_MESSAGE.to_owned()
        } else {
            error.message().to_owned()
        };
        Self {
            success: false,
            code: error.code(),
            message,
            trace_id: error.trace_id().map(str::to_owned),
            errors: error.violations().to_vec(),
            stack: verbose.then(|| error.stack()),
        }
    }
}

const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(ErrorEnvelope::from_error(self, ErrorDetail::current()))
    }
}

/// JSON body extractor settings mapping decode failures into the envelope.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req: &HttpRequest| {
        debug!(%err, path = req.path(), "rejected request body");
        Error::invalid_request(format!("Invalid request body: {err}")).into()
    })
}

/// Query string extractor settings mapping decode failures into the envelope.
#[must_use]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req: &HttpRequest| {
        debug!(%err, path = req.path(), "rejected query string");
        Error::invalid_request(format!("Invalid query string: {err}")).into()
    })
}

/// Fallback for unmatched routes so they use the envelope too.
pub async fn route_not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    warn!(path = req.path(), method = %req.method(), "no route matched");
    Err(Error::not_found(format!(
        "Route {} {} not found",
        req.method(),
        req.path()
    )))
}

#[cfg(test)]
mod tests;
