use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config = Self::parse(&raw)?;
        tracing::debug!(path = %path.display(), environment = %config.environment, "configuration loaded");

        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the health path, request id headers, or
    /// exporter endpoint are malformed
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_health()?;
        self.validate_request_id_headers()?;
        self.validate_exporter()?;
        Ok(())
    }

    fn validate_health(&self) -> anyhow::Result<()> {
        let health = &self.server.health;
        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/': `{}`", health.path);
        }
        Ok(())
    }

    fn validate_request_id_headers(&self) -> anyhow::Result<()> {
        for name in &self.server.request_id_headers {
            http::HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| anyhow::anyhow!("invalid request id header `{name}`: {e}"))?;
        }
        Ok(())
    }

    fn validate_exporter(&self) -> anyhow::Result<()> {
        let Some(exporter) = self.telemetry.as_ref().and_then(|t| t.exporter.as_ref()) else {
            return Ok(());
        };

        if !matches!(exporter.endpoint.scheme(), "http" | "https") {
            anyhow::bail!(
                "telemetry.exporter.endpoint must use http or https: `{}`",
                exporter.endpoint
            );
        }

        if exporter.export_interval == 0 {
            anyhow::bail!("telemetry.exporter.export_interval must be greater than 0");
        }

        Ok(())
    }
}
