use http::StatusCode;
use jiff::Timestamp;
use jiff::fmt::temporal::DateTimePrinter;
use serde::Serialize;

/// Response produced by a rule, before it is stamped with a timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<String>,
    pub stack: Option<String>,
    pub retry_after: Option<String>,
    pub request_id: Option<String>,
}

impl Draft {
    /// Start a draft with a status and a user-safe message
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: None,
            stack: None,
            retry_after: None,
            request_id: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: Option<impl Into<String>>) -> Self {
        self.stack = stack.map(Into::into);
        self
    }

    /// Advertise a retry delay in seconds
    #[must_use]
    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(seconds.to_string());
        self
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// JSON body returned to the client for every failed request
///
/// `success` is always `false` and `code` always mirrors the status sent on
/// the wire. Optional fields are left out of the JSON when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    success: bool,
    pub error: String,
    pub code: u16,
    /// RFC 3339 instant in UTC with millisecond precision
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// Seconds to wait before retrying, as a string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorEnvelope {
    pub(crate) fn stamp(draft: Draft, now: Timestamp) -> Self {
        Self {
            success: false,
            error: draft.error,
            code: draft.status.as_u16(),
            timestamp: format_timestamp(now),
            details: draft.details,
            stack: draft.stack,
            retry_after: draft.retry_after,
            request_id: draft.request_id,
        }
    }

    pub const fn success(&self) -> bool {
        self.success
    }
}

fn format_timestamp(now: Timestamp) -> String {
    DateTimePrinter::new().precision(Some(3)).timestamp_to_string(&now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_instant() -> Timestamp {
        Timestamp::from_second(1_700_000_000).unwrap()
    }

    #[test]
    fn omits_absent_fields() {
        let draft = Draft::new(StatusCode::REQUEST_TIMEOUT, "Request timeout");
        let envelope = ErrorEnvelope::stamp(draft, fixed_instant());

        let json = serde_json::to_string_pretty(&envelope).unwrap();
        insta::assert_snapshot!(json, @r#"
        {
          "success": false,
          "error": "Request timeout",
          "code": 408,
          "timestamp": "2023-11-14T22:13:20.000Z"
        }
        "#);
    }

    #[test]
    fn uses_camel_case_keys() {
        let draft = Draft::new(StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded")
            .with_retry_after(60)
            .with_request_id("abc");
        let envelope = ErrorEnvelope::stamp(draft, fixed_instant());

        let json = serde_json::to_string_pretty(&envelope).unwrap();
        insta::assert_snapshot!(json, @r#"
        {
          "success": false,
          "error": "Rate limit exceeded",
          "code": 429,
          "timestamp": "2023-11-14T22:13:20.000Z",
          "retryAfter": "60",
          "requestId": "abc"
        }
        "#);
    }

    #[test]
    fn timestamp_keeps_milliseconds() {
        let now = Timestamp::new(1_700_000_000, 123_456_789).unwrap();
        let envelope = ErrorEnvelope::stamp(Draft::new(StatusCode::BAD_REQUEST, "Validation failed"), now);
        assert_eq!(envelope.timestamp, "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn stack_skipped_when_fault_has_none() {
        let draft = Draft::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").with_stack(None::<String>);
        assert!(draft.stack.is_none());
    }
}
