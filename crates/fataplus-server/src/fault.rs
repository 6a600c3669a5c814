use std::any::Any;
use std::sync::Arc;

use axum::Json;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use fataplus_core::{Environment, HttpError, RequestContext};
use fataplus_errors::{Classified, Classifier, Fault, FaultKind};
use fataplus_telemetry::FaultMetrics;
use http::{HeaderValue, StatusCode, header};

use crate::error::ApiError;

/// Error type returned by request handlers
///
/// Converting it into a response only parks the fault in the response
/// extensions; [`fault_middleware`] classifies it once the request context
/// is known.
#[derive(Debug, Clone)]
pub struct ApiFault(pub Fault);

impl ApiFault {
    /// Wrap a domain error that already knows its status
    pub fn http_error<E>(error: E) -> Self
    where
        E: HttpError + Send + Sync + 'static,
    {
        Self(Fault::from_http_error(error))
    }
}

impl From<Fault> for ApiFault {
    fn from(fault: Fault) -> Self {
        Self(fault)
    }
}

impl From<ApiError> for ApiFault {
    fn from(error: ApiError) -> Self {
        Self::http_error(error)
    }
}

impl IntoResponse for ApiFault {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(self.0);
        response
    }
}

/// Shared state for [`fault_middleware`]
#[derive(Clone)]
pub struct FaultResponder {
    classifier: Arc<Classifier>,
    metrics: FaultMetrics,
    environment: Environment,
}

impl FaultResponder {
    pub fn new(classifier: Classifier, environment: Environment) -> Self {
        Self {
            classifier: Arc::new(classifier),
            metrics: FaultMetrics::new(),
            environment,
        }
    }

    /// Classify a fault and render the response for it
    pub fn respond(&self, fault: &Fault, ctx: &RequestContext) -> Response {
        let classified = self.classifier.classify(fault, ctx);
        self.metrics
            .record_fault(classified.bucket.error_type(), classified.status.as_u16());
        classified_response(classified)
    }
}

/// Middleware that turns parked faults into classified JSON responses
pub async fn fault_middleware(responder: FaultResponder, request: Request, next: Next) -> Response {
    let context = request
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_else(|| RequestContext::new(responder.environment));

    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<Fault>() {
        Some(fault) => responder.respond(&fault, &context),
        None => response,
    }
}

/// Render a classified fault as a JSON response
///
/// Rate-limited responses also carry a `retry-after` header.
pub fn classified_response(classified: Classified) -> Response {
    let retry_after = classified
        .envelope
        .retry_after
        .as_deref()
        .and_then(|value| HeaderValue::from_str(value).ok());

    let mut response = (classified.status, Json(classified.envelope)).into_response();

    if let Some(value) = retry_after {
        response.headers_mut().insert(header::RETRY_AFTER, value);
    }

    response
}

/// Fallback for unmatched routes
pub async fn not_found(request: Request) -> ApiFault {
    ApiError::NotFound {
        path: request.uri().path().to_owned(),
    }
    .into()
}

/// Fallback for routes hit with an unsupported method
pub async fn method_not_allowed(request: Request) -> ApiFault {
    ApiError::MethodNotAllowed {
        method: request.method().to_string(),
    }
    .into()
}

/// Converts a handler panic into a parked fault
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "handler panicked".to_owned());

    ApiFault(Fault::new(FaultKind::Other("Panic".to_owned()), message)).into_response()
}
