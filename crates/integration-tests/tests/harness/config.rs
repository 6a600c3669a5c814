//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use fataplus_config::{Config, HealthConfig, ServerConfig};
use fataplus_core::Environment;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with production defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                environment: Environment::Production,
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                telemetry: None,
            },
        }
    }

    /// Run as a development deployment
    pub fn development(mut self) -> Self {
        self.config.environment = Environment::Development;
        self
    }

    /// Replace the headers searched for a correlation id
    pub fn with_request_id_headers(mut self, headers: &[&str]) -> Self {
        self.config.server.request_id_headers = headers.iter().map(|h| (*h).to_owned()).collect();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
