use std::fmt;

/// Taxonomy category a fault is classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Upstream already chose the status
    ExplicitHttp,
    /// Bad or expired credential
    Auth,
    /// Embedded database failure
    Persistence,
    /// Object-store failure
    BlobStorage,
    /// Malformed input
    Validation,
    /// Downstream service unreachable
    Dependency,
    /// Operation exceeded its deadline
    Timeout,
    /// Quota exceeded
    RateLimit,
    /// Unclassified or unexpected
    Internal,
}

impl Bucket {
    /// Machine-readable error type, used as a log and metric label
    pub const fn error_type(self) -> &'static str {
        match self {
            Self::ExplicitHttp => "explicit_http_error",
            Self::Auth => "authentication_error",
            Self::Persistence => "database_error",
            Self::BlobStorage => "storage_error",
            Self::Validation => "validation_error",
            Self::Dependency => "dependency_error",
            Self::Timeout => "timeout_error",
            Self::RateLimit => "rate_limit_error",
            Self::Internal => "internal_error",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_type())
    }
}
