use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use fataplus_core::{Environment, RequestContext, headers};
use http::HeaderName;

/// Middleware that records the request's context before any handler runs
///
/// The correlation id is taken from the first configured header present on
/// the request.
pub async fn request_context_middleware(
    environment: Environment,
    request_id_headers: Arc<[HeaderName]>,
    mut request: Request,
    next: Next,
) -> Response {
    let mut context = RequestContext::new(environment);
    if let Some(request_id) = headers::extract_request_id(request.headers(), &request_id_headers) {
        context = context.with_request_id(request_id);
    }

    request.extensions_mut().insert(context);

    next.run(request).await
}
