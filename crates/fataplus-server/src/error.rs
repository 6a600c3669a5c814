use fataplus_core::HttpError;
use http::StatusCode;
use thiserror::Error;

/// Failures raised by the hosting layer itself
#[derive(Debug, Error)]
pub enum ApiError {
    /// No route matches the request path
    #[error("no route for {path}")]
    NotFound { path: String },

    /// Route exists but not for this method
    #[error("method {method} not allowed")]
    MethodNotAllowed { method: String },
}

impl HttpError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::NotFound { .. } => "not_found_error",
            Self::MethodNotAllowed { .. } => "method_not_allowed_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::NotFound { .. } => "Not found".to_owned(),
            Self::MethodNotAllowed { .. } => "Method not allowed".to_owned(),
        }
    }
}
