//! Middleware selecting how much failure detail responses may reveal.
//!
//! [`Diagnostics`] places an [`ErrorDetail`] in task-local storage for the
//! request. The error envelope reads it when serialising: verbose detail adds
//! the cause chain as `stack` and keeps internal messages, redacted detail
//! hides both. Outside a request the redacted level applies.

use std::future::Future;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tokio::task_local;

task_local! {
    static DETAIL: ErrorDetail;
}

/// Amount of failure detail exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorDetail {
    /// Include stacks and internal messages. Development only.
    Verbose,
    /// Redact internal messages and omit stacks.
    #[default]
    Redacted,
}

impl ErrorDetail {
    /// Detail level for the running request.
    #[must_use]
    pub fn current() -> Self {
        DETAIL.try_with(|detail| *detail).unwrap_or_default()
    }

    /// Run `fut` with `detail` in scope.
    pub async fn scope<Fut>(detail: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        DETAIL.scope(detail, fut).await
    }
}

/// Middleware factory fixing the detail level for every request.
///
/// ```
/// use actix_web::App;
/// use backend::middleware::{Diagnostics, ErrorDetail};
///
/// let _app = App::new().wrap(Diagnostics::new(ErrorDetail::Verbose));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Diagnostics {
    detail: ErrorDetail,
}

impl Diagnostics {
    /// Expose `detail` to every wrapped request.
    #[must_use]
    pub const fn new(detail: ErrorDetail) -> Self {
        Self { detail }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Diagnostics
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = DiagnosticsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(DiagnosticsMiddleware {
            service,
            detail: self.detail,
        }))
    }
}

/// Service produced by [`Diagnostics`].
pub struct DiagnosticsMiddleware<S> {
    service: S,
    detail: ErrorDetail,
}

impl<S, B> Service<ServiceRequest> for DiagnosticsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        Box::pin(ErrorDetail::scope(self.detail, self.service.call(req)))
    }
}
