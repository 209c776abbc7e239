//! LaunchProfile built from command-line overrides.
use std::path::PathBuf;

/// Values given on the command line; each one beats its environment variable.
#[derive(Debug, Clone, Default)]
pub struct LaunchProfile {
    pub config_override: Option<PathBuf>,
    pub transport: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub launch_args: Vec<String>,
}

/// Build launch arguments suitable for reproduction/logging.
pub fn build_launch_args(
    config: Option<&PathBuf>,
    transport: Option<&str>,
    host: Option<&str>,
    port: Option<u16>,
) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(config) = config {
        args.push(format!("--config={}", config.display()));
    }
    if let Some(transport) = transport {
        args.push(format!("--transport={transport}"));
    }
    if let Some(host) = host {
        args.push(format!("--host={host}"));
    }
    if let Some(port) = port {
        args.push(format!("--port={port}"));
    }
    args
}
