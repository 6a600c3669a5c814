use std::net::SocketAddr;

use serde::Deserialize;

use crate::health::HealthConfig;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    /// Headers searched, in order, for the correlation id reported in
    /// internal-error responses
    #[serde(default = "default_request_id_headers")]
    pub request_id_headers: Vec<String>,
    #[serde(default)]
    pub health: HealthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            request_id_headers: default_request_id_headers(),
            health: HealthConfig::default(),
        }
    }
}

fn default_request_id_headers() -> Vec<String> {
    fataplus_core::headers::default_request_id_headers()
        .iter()
        .map(|name| name.as_str().to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_headers_match_core() {
        let config = ServerConfig::default();
        let core = fataplus_core::headers::default_request_id_headers();

        assert_eq!(config.request_id_headers.len(), core.len());
        for (configured, expected) in config.request_id_headers.iter().zip(&core) {
            assert_eq!(configured, expected.as_str());
        }
        assert_eq!(config.request_id_headers, ["cf-ray", "x-request-id"]);
    }
}
