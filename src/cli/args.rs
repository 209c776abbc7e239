//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use clap::Parser;

use super::{build_launch_args, LaunchProfile};

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Bybit v5 REST API exposed as MCP tools",
    long_about = None
)]
pub struct LaunchProfileArgs {
    /// Transport: stdio (default) or sse (overrides MCP_TRANSPORT).
    #[arg(long)]
    pub transport: Option<String>,
    /// Bind address for the sse transport (overrides MCP_HOST).
    #[arg(long)]
    pub host: Option<String>,
    /// Listening port for the sse transport (overrides MCP_PORT).
    #[arg(long)]
    pub port: Option<u16>,
    /// Path to config.toml (overrides MCP_CONFIG_PATH).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
}

impl LaunchProfileArgs {
    /// Build a `LaunchProfile` from CLI args.
    pub fn build(self) -> LaunchProfile {
        let launch_args = build_launch_args(
            self.config_override.as_ref(),
            self.transport.as_deref(),
            self.host.as_deref(),
            self.port,
        );

        LaunchProfile {
            config_override: self.config_override,
            transport: self.transport,
            host: self.host,
            port: self.port,
            launch_args,
        }
    }
}
