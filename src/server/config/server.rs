use std::{path::Path, str::FromStr};

use serde::Deserialize;

use crate::lib::errors::ConfigError;

pub const DEFAULT_TRANSPORT: &str = "stdio";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// MCP transport mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    /// JSON-RPC over stdin/stdout.
    Stdio,
    /// Streamable HTTP on `host:port`, selected with `sse`.
    Sse,
}

impl TransportMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Stdio => "stdio",
            TransportMode::Sse => "sse",
        }
    }
}

impl FromStr for TransportMode {
    type Err = ConfigError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "stdio" => Ok(TransportMode::Stdio),
            "sse" => Ok(TransportMode::Sse),
            _ => Err(ConfigError::UnsupportedTransport { value: normalized }),
        }
    }
}

/// Transport and socket settings.
#[derive(Debug, Clone)]
pub struct ServerSection {
    pub transport: TransportMode,
    pub host: String,
    pub port: u16,
}

impl ServerSection {
    /// `host:port` used when the HTTP transport is selected.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            transport: TransportMode::Stdio,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawServerSection {
    pub transport: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
}

pub fn parse_server_section(
    raw: Option<RawServerSection>,
    path: &Path,
) -> Result<ServerSection, ConfigError> {
    let server_raw = raw.unwrap_or_default();
    let transport = server_raw
        .transport
        .as_deref()
        .unwrap_or(DEFAULT_TRANSPORT)
        .parse::<TransportMode>()?;
    let host = server_raw
        .host
        .map(|host| host.trim().to_string())
        .filter(|host| !host.is_empty())
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = match server_raw.port {
        Some(raw_port) => parse_port(&raw_port, path)?,
        None => DEFAULT_PORT,
    };
    Ok(ServerSection {
        transport,
        host,
        port,
    })
}

fn parse_port(raw: &str, path: &Path) -> Result<u16, ConfigError> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "server.port",
            message: format!("`{raw}` is not a port in the range 1-65535"),
        }),
    }
}
