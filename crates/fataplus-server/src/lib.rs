#![allow(clippy::must_use_candidate)]

mod error;
mod fault;
mod health;
mod request_context;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use fataplus_config::Config;
use fataplus_errors::Classifier;
use http::HeaderName;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use fault::{ApiFault, FaultResponder, classified_response};

/// Assembled server with the API routes and the fault-handling middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server around `api` with the standard classifier
    ///
    /// # Errors
    ///
    /// Returns an error if a configured request id header is not a valid
    /// header name
    pub fn new(config: &Config, api: Router) -> anyhow::Result<Self> {
        Self::with_classifier(config, api, Classifier::default())
    }

    /// Build the server around `api` with a custom classifier
    ///
    /// # Errors
    ///
    /// Returns an error if a configured request id header is not a valid
    /// header name
    pub fn with_classifier(config: &Config, api: Router, classifier: Classifier) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let request_id_headers = config
            .server
            .request_id_headers
            .iter()
            .map(|name| {
                HeaderName::from_bytes(name.as_bytes())
                    .map_err(|e| anyhow::anyhow!("invalid request id header `{name}`: {e}"))
            })
            .collect::<anyhow::Result<Arc<[HeaderName]>>>()?;

        let environment = config.environment;
        let responder = FaultResponder::new(classifier, environment);

        let mut app = api;

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        app = app
            .fallback(fault::not_found)
            .method_not_allowed_fallback(fault::method_not_allowed);

        // Apply middleware layers (innermost first)

        // Panics become parked faults, classified by the layer above
        app = app.layer(CatchPanicLayer::custom(fault::panic_response));

        // Fault classification
        app = app.layer(axum::middleware::from_fn(move |req, next| {
            let responder = responder.clone();
            async move { fault::fault_middleware(responder, req, next).await }
        }));

        // Request context (outside classification so it is set before faults are raised)
        app = app.layer(axum::middleware::from_fn(move |req, next| {
            let headers = Arc::clone(&request_id_headers);
            async move { request_context::request_context_middleware(environment, headers, req, next).await }
        }));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        tracing::debug!(%environment, %listen_address, "server assembled");

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Override the listen address
    #[must_use]
    pub fn with_listen_address(mut self, listen_address: SocketAddr) -> Self {
        self.listen_address = listen_address;
        self
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::routing::get;
    use fataplus_core::Environment;
    use fataplus_errors::{Fault, FaultKind};
    use http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    async fn failing() -> Result<&'static str, ApiFault> {
        Err(Fault::new(FaultKind::Other("WeirdCustomError".to_owned()), "something broke")
            .with_stack("at failing")
            .into())
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn router(environment: Environment) -> Router {
        let config = Config {
            environment,
            ..Config::default()
        };
        let api = Router::new().route("/v1/farms", get(failing));
        Server::new(&config, api).unwrap().into_router()
    }

    #[tokio::test]
    async fn handler_fault_is_classified() {
        let request = Request::get("/v1/farms")
            .header("cf-ray", "8a1b2c3d-CDG")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(router(Environment::Production), request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["requestId"], "8a1b2c3d-CDG");
        assert!(body.get("details").is_none());
        assert!(body.get("stack").is_none());
    }

    #[tokio::test]
    async fn development_exposes_fallback_detail() {
        let request = Request::get("/v1/farms").body(Body::empty()).unwrap();

        let (_, body) = send(router(Environment::Development), request).await;

        assert_eq!(body["requestId"], "unknown");
        assert_eq!(body["details"], "something broke");
        assert_eq!(body["stack"], "at failing");
    }

    #[tokio::test]
    async fn unknown_route_is_explicit_not_found() {
        let request = Request::get("/v1/nowhere").body(Body::empty()).unwrap();

        let (status, body) = send(router(Environment::Production), request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
        assert_eq!(body["error"], "Not found");
    }

    #[tokio::test]
    async fn wrong_method_is_explicit() {
        let request = Request::delete("/v1/farms").body(Body::empty()).unwrap();

        let (status, body) = send(router(Environment::Production), request).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn health_is_untouched() {
        let request = Request::get("/health").body(Body::empty()).unwrap();

        let (status, body) = send(router(Environment::Production), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
