use jiff::Timestamp;

use crate::Environment;

/// Read-only facts about the request that failed
///
/// Built by the transport once per request and handed to the classifier
/// alongside the fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Deployment environment, gates diagnostic detail
    pub environment: Environment,
    /// Correlation identifier supplied by the edge (e.g. `cf-ray`)
    pub request_id: Option<String>,
    /// When the request arrived
    pub received_at: Timestamp,
}

impl RequestContext {
    /// Create a context for a request arriving now
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            request_id: None,
            received_at: Timestamp::now(),
        }
    }

    /// Attach a correlation identifier
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Minimal production context with no correlation id
    ///
    /// Used for faults raised outside any HTTP request
    pub fn empty() -> Self {
        Self::new(Environment::Production)
    }
}
