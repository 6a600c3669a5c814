use http::StatusCode;

/// Trait for domain errors that already know their HTTP status
///
/// Implemented by feature crates whose errors carry an explicit status. The
/// classifier treats these as caller-decided faults and never overrides the
/// status they report.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `not_found_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}
