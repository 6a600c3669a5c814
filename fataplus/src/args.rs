use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use fataplus_core::Environment;

/// Fataplus API error gateway
#[derive(Debug, Parser)]
#[command(name = "fataplus", about = "Fataplus API server with structured error responses")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "fataplus.toml", env = "FATAPLUS_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "FATAPLUS_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Override the deployment environment (`development` exposes fault detail)
    #[arg(long, env = "FATAPLUS_ENV")]
    pub environment: Option<Environment>,

    /// Log filter directive
    #[arg(long, default_value = "info", env = "FATAPLUS_LOG")]
    pub log: String,
}
