//! Correlation middleware attaching a request-scoped identifier.
//!
//! Each incoming request receives a UUID correlation identifier stored in
//! task-local storage so logs and error envelopes produced anywhere in the
//! request can carry the same value. The identifier is echoed back on every
//! response in the `trace-id` header.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`CorrelationId::scope`] when spawning new tasks or moving work onto
//! blocking threads so the active identifier follows the work.

use std::future::Future;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tokio::task_local;
use tracing::error;
use uuid::Uuid;

use crate::domain::TRACE_ID_HEADER;

task_local! {
    static CORRELATION_ID: CorrelationId;
}

/// Per-request correlation identifier exposed via task-local storage.
///
/// # Examples
/// ```
/// use heliix::middleware::correlation::CorrelationId;
///
/// async fn handler() {
///     if let Some(id) = CorrelationId::current() {
///         println!("correlated as {}", id);
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    #[rustfmt::skip]
    fn generate() -> Self { Self(Uuid::new_v4()) }

    /// Returns the current identifier if one is in scope.
    #[must_use]
    #[rustfmt::skip]
    pub fn current() -> Option<Self> { CORRELATION_ID.try_with(|id| *id).ok() }

    /// Execute the provided future with the supplied identifier in scope.
    ///
    /// # Examples
    /// ```
    /// use heliix::middleware::correlation::CorrelationId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let id: CorrelationId = "00000000-0000-0000-0000-000000000000"
    ///     .parse()
    ///     .expect("valid UUID");
    /// let observed = CorrelationId::scope(id, async move { CorrelationId::current() }).await;
    /// assert_eq!(observed, Some(id));
    /// # });
    /// ```
    pub async fn scope<Fut>(id: CorrelationId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CORRELATION_ID.scope(id, fut).await
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CorrelationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Middleware attaching a request-scoped UUID and adding a `trace-id`
/// header to every response.
///
/// Handlers can read the identifier via [`CorrelationId::current`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use heliix::middleware::Correlation;
///
/// let app = App::new().wrap(Correlation);
/// ```
#[derive(Clone)]
pub struct Correlation;

impl<S, B> Transform<S, ServiceRequest> for Correlation
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CorrelationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorrelationMiddleware { service }))
    }
}

/// Service wrapper produced by [`Correlation`].
///
/// Applications should not use this type directly.
pub struct CorrelationMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CorrelationMiddleware<S>
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
        let id = CorrelationId::generate();
        let header_value = id.to_string();
        let fut = self.service.call(req);
        Box::pin(CorrelationId::scope(id, async move {
            let mut res = fut.await?;
            match HeaderValue::from_str(&header_value) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(error) => {
                    error!(
                        %error,
                        correlation_id = %id,
                        "failed to encode correlation header"
                    );
                }
            }
            Ok(res)
        }))
    }
}
