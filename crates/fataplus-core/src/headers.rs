use http::HeaderMap;
use http::header::HeaderName;

/// Edge request id set by Cloudflare on every proxied request
pub const CF_RAY: &str = "cf-ray";

/// Conventional request id header set by load balancers and clients
pub const X_REQUEST_ID: &str = "x-request-id";

/// Headers consulted for a correlation id when none are configured
pub fn default_request_id_headers() -> Vec<HeaderName> {
    vec![HeaderName::from_static(CF_RAY), HeaderName::from_static(X_REQUEST_ID)]
}

/// Find the first non-empty correlation id among `names`, in order
pub fn extract_request_id(headers: &HeaderMap, names: &[HeaderName]) -> Option<String> {
    names.iter().find_map(|name| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ToOwned::to_owned)
    })
}
