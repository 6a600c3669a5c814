//! Handlers that fail the way the dashboard API does in production

use axum::Router;
use axum::extract::Path;
use axum::routing::get;
use fataplus_errors::{Fault, FaultKind};
use fataplus_server::ApiFault;
use http::StatusCode;

/// Router exposing one failing endpoint per fault shape
pub fn failing_api() -> Router {
    Router::new()
        .route("/v1/ok", get(|| async { "fine" }))
        .route("/v1/fail/{shape}", get(fail))
        .route("/v1/panic", get(panicking))
}

async fn fail(Path(shape): Path<String>) -> Result<&'static str, ApiFault> {
    let fault = match shape.as_str() {
        "conflict" => Fault::http(StatusCode::CONFLICT, "Farm name already taken"),
        "token" => Fault::new(FaultKind::TokenExpired, "jwt expired at 2026-10-01T00:00:00Z"),
        "database" => Fault::new(
            FaultKind::Other("Error".to_owned()),
            "D1_ERROR: SQLITE_CONSTRAINT: UNIQUE constraint failed: users.email",
        ),
        "storage" => Fault::new(FaultKind::Other("Error".to_owned()), "R2 bucket fataplus-uploads unavailable"),
        "validation" => Fault::new(FaultKind::Validation, "email is required"),
        "fetch" => Fault::new(FaultKind::Type, "fetch failed: weather.internal:443"),
        "timeout" => Fault::new(FaultKind::Timeout, "analytics query exceeded 30s"),
        "rate-limit" => Fault::new(FaultKind::Other("Error".to_owned()), "rate limit exceeded for key X"),
        _ => Fault::new(FaultKind::Other("WeirdCustomError".to_owned()), "something broke")
            .with_stack("at fail (routes.rs)"),
    };

    Err(fault.into())
}

#[allow(clippy::unused_async)]
async fn panicking() -> &'static str {
    panic!("farm index out of bounds")
}
