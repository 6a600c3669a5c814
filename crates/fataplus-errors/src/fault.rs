use std::fmt;
use std::sync::Arc;

use fataplus_core::HttpError;
use http::StatusCode;
use thiserror::Error;

/// Discriminant of a raised fault
///
/// Covers the names the classifier reacts to. Anything else is kept verbatim
/// in [`FaultKind::Other`] so it still shows up in logs. A [`Fault`] never
/// holds `Other` with a recognised name; it is folded into its variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// Token signature or structure is invalid
    TokenInvalid,
    /// Token is not valid yet (`nbf` in the future)
    TokenNotBefore,
    /// Token lifetime has elapsed
    TokenExpired,
    /// Input failed schema or business validation
    Validation,
    /// Type or conversion error, typically from a failed `fetch`
    Type,
    /// Operation exceeded its deadline
    Timeout,
    /// Any other named error
    Other(String),
}

impl FaultKind {
    /// Parse a kind from an error name
    ///
    /// Accepts both the canonical names (`TokenExpired`) and the names used by
    /// common JS frameworks (`TokenExpiredError`).
    pub fn from_name(name: &str) -> Self {
        match name {
            "TokenInvalid" | "JsonWebTokenError" => Self::TokenInvalid,
            "TokenNotBefore" | "NotBeforeError" => Self::TokenNotBefore,
            "TokenExpired" | "TokenExpiredError" => Self::TokenExpired,
            "Validation" | "ValidationError" => Self::Validation,
            "Type" | "TypeError" => Self::Type,
            "Timeout" | "TimeoutError" => Self::Timeout,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Fold `Other` carrying a recognised name into its variant
    #[must_use]
    pub fn normalize(self) -> Self {
        match self {
            Self::Other(name) => Self::from_name(&name),
            known => known,
        }
    }

    /// Name of this kind, in the framework spelling
    pub fn name(&self) -> &str {
        match self {
            Self::TokenInvalid => "JsonWebTokenError",
            Self::TokenNotBefore => "NotBeforeError",
            Self::TokenExpired => "TokenExpiredError",
            Self::Validation => "ValidationError",
            Self::Type => "TypeError",
            Self::Timeout => "TimeoutError",
            Self::Other(name) => name,
        }
    }

    /// Whether this kind signals a bad or expired credential
    pub const fn is_token(&self) -> bool {
        matches!(self, Self::TokenInvalid | Self::TokenNotBefore | Self::TokenExpired)
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A failure raised by a request handler
///
/// Immutable once built. The classifier only reads it.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct Fault {
    kind: FaultKind,
    message: String,
    status_hint: Option<StatusCode>,
    stack: Option<String>,
    #[source]
    source: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl Fault {
    /// Create a fault of the given kind
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind: kind.normalize(),
            message: message.into(),
            status_hint: None,
            stack: None,
            source: None,
        }
    }

    /// Create a fault whose status the caller has already decided
    ///
    /// The classifier answers with `status` and `message` verbatim.
    pub fn http(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_hint: Some(status),
            ..Self::new(FaultKind::Other("HttpException".to_owned()), message)
        }
    }

    /// Capture an error by its message and source chain
    pub fn wrap<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::new(FaultKind::Other("Error".to_owned()), error.to_string()).with_source(error)
    }

    /// Convert a domain error that knows its own status
    ///
    /// Only the client-safe message is carried into the response; the
    /// original error stays reachable through [`std::error::Error::source`].
    pub fn from_http_error<E>(error: E) -> Self
    where
        E: HttpError + Send + Sync + 'static,
    {
        Self {
            kind: FaultKind::from_name(error.error_type()),
            status_hint: Some(error.status_code()),
            message: error.client_message(),
            stack: None,
            source: Some(Arc::new(error)),
        }
    }

    /// Attach a debug trace
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Attach an underlying cause
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }

    pub const fn kind(&self) -> &FaultKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Status explicitly chosen upstream, if any
    pub const fn status_hint(&self) -> Option<StatusCode> {
        self.status_hint
    }

    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }
}
