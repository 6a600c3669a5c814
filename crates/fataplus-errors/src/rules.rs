//! Ordered classification rules
//!
//! Categories overlap (a message can mention both `timeout` and `rate limit`),
//! so the first matching rule wins and the order of [`standard`] must not
//! change.

use std::fmt;

use fataplus_core::RequestContext;
use http::StatusCode;

use crate::{Bucket, Draft, Fault, FaultKind};

/// Marker carried by every embedded database error message
pub const DATABASE_MARKER: &str = "SQLITE_";

/// Markers identifying object-store failures (case-sensitive)
pub const STORAGE_MARKERS: [&str; 2] = ["R2", "storage"];

/// Seconds a rate-limited client is told to wait
pub const RATE_LIMIT_RETRY_AFTER: u64 = 60;

/// Request id reported when the transport supplied none
pub const UNKNOWN_REQUEST_ID: &str = "unknown";

type Predicate = Box<dyn Fn(&Fault) -> bool + Send + Sync>;
type Responder = Box<dyn Fn(&Fault, &RequestContext) -> Draft + Send + Sync>;

/// A `(predicate, responder)` pair tagged with the bucket it fills
pub struct Rule {
    bucket: Bucket,
    matches: Predicate,
    respond: Responder,
}

impl Rule {
    pub fn new<P, R>(bucket: Bucket, matches: P, respond: R) -> Self
    where
        P: Fn(&Fault) -> bool + Send + Sync + 'static,
        R: Fn(&Fault, &RequestContext) -> Draft + Send + Sync + 'static,
    {
        Self {
            bucket,
            matches: Box::new(matches),
            respond: Box::new(respond),
        }
    }

    pub const fn bucket(&self) -> Bucket {
        self.bucket
    }

    pub fn matches(&self, fault: &Fault) -> bool {
        (self.matches)(fault)
    }

    pub fn respond(&self, fault: &Fault, ctx: &RequestContext) -> Draft {
        (self.respond)(fault, ctx)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("bucket", &self.bucket).finish_non_exhaustive()
    }
}

/// Rule for faults whose status was decided upstream
///
/// Always evaluated first; nothing may override an explicit status.
pub fn explicit() -> Rule {
    Rule::new(
        Bucket::ExplicitHttp,
        |fault| fault.status_hint().is_some(),
        |fault, _| {
            let status = fault.status_hint().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Draft::new(status, fault.message())
        },
    )
}

/// The standard table that follows [`explicit`], in evaluation order
pub fn standard() -> Vec<Rule> {
    vec![
        // Token detail is never shown, not even in development
        Rule::new(
            Bucket::Auth,
            |fault| fault.kind().is_token(),
            |_, _| Draft::new(StatusCode::UNAUTHORIZED, "Invalid or expired token"),
        ),
        Rule::new(
            Bucket::Persistence,
            |fault| fault.message().contains(DATABASE_MARKER),
            |fault, ctx| {
                let draft = Draft::new(StatusCode::INTERNAL_SERVER_ERROR, "Database error occurred");
                if ctx.environment.is_development() {
                    draft.with_details(fault.message())
                } else {
                    draft
                }
            },
        ),
        // Storage messages can name internal buckets and hosts
        Rule::new(
            Bucket::BlobStorage,
            |fault| STORAGE_MARKERS.iter().any(|marker| fault.message().contains(marker)),
            |_, _| Draft::new(StatusCode::SERVICE_UNAVAILABLE, "Storage service error"),
        ),
        Rule::new(
            Bucket::Validation,
            |fault| *fault.kind() == FaultKind::Validation,
            |fault, _| Draft::new(StatusCode::BAD_REQUEST, "Validation failed").with_details(fault.message()),
        ),
        Rule::new(
            Bucket::Dependency,
            |fault| *fault.kind() == FaultKind::Type && fault.message().contains("fetch"),
            |_, _| Draft::new(StatusCode::SERVICE_UNAVAILABLE, "External service unavailable"),
        ),
        Rule::new(
            Bucket::Timeout,
            |fault| *fault.kind() == FaultKind::Timeout || fault.message().contains("timeout"),
            |_, _| Draft::new(StatusCode::REQUEST_TIMEOUT, "Request timeout"),
        ),
        Rule::new(
            Bucket::RateLimit,
            |fault| fault.message().contains("rate limit"),
            |_, _| {
                Draft::new(StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded")
                    .with_retry_after(RATE_LIMIT_RETRY_AFTER)
            },
        ),
    ]
}

/// Response for anything no rule matched
pub fn fallback(fault: &Fault, ctx: &RequestContext) -> Draft {
    let request_id = ctx.request_id.as_deref().unwrap_or(UNKNOWN_REQUEST_ID);
    let draft = Draft::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").with_request_id(request_id);

    if ctx.environment.is_development() {
        draft.with_details(fault.message()).with_stack(fault.stack())
    } else {
        draft
    }
}
