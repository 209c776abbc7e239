//! Load and validate server configuration.
//!
//! Sources, highest precedence first: CLI flags, environment variables, the
//! TOML config file, built-in defaults.
use std::{env, path::PathBuf};

use serde::Deserialize;
use tracing::{error, info};

use crate::{cli::LaunchProfile, lib::errors::ConfigError};

pub mod bybit;
pub mod server;
pub mod telemetry;

pub use bybit::{parse_bybit_section, BybitSection, RawBybitSection};
pub use server::{
    parse_server_section, RawServerSection, ServerSection, TransportMode, DEFAULT_HOST,
    DEFAULT_PORT, DEFAULT_TRANSPORT,
};

pub const CONFIG_ENV_KEY: &str = "MCP_CONFIG_PATH";
pub const TRANSPORT_ENV_KEY: &str = "MCP_TRANSPORT";
pub const HOST_ENV_KEY: &str = "MCP_HOST";
pub const PORT_ENV_KEY: &str = "MCP_PORT";
pub const API_KEY_ENV_KEY: &str = "BYBIT_API_KEY";
pub const API_SECRET_ENV_KEY: &str = "BYBIT_API_SECRET";
pub const TESTNET_ENV_KEY: &str = "BYBIT_TESTNET";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level configuration container.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub bybit: BybitSection,
    /// Config file that was read, if one existed.
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawServerConfig {
    server: Option<RawServerSection>,
    bybit: Option<RawBybitSection>,
}

impl ServerConfig {
    /// Load configuration using the process environment.
    pub fn load(profile: &LaunchProfile) -> Result<Self, ConfigError> {
        Self::load_with_env(profile, |key| env::var(key).ok())
    }

    /// Load configuration with an injectable environment lookup.
    pub fn load_with_env<F>(profile: &LaunchProfile, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let trimmed = |key: &str| lookup(key).map(|value| value.trim().to_string());
        // An empty transport is still a value and must fail transport parsing.
        let lookup = |key: &str| trimmed(key).filter(|value| !value.is_empty());

        let (path, explicit) = match profile.config_override.clone() {
            Some(path) => (path, true),
            None => match lookup(CONFIG_ENV_KEY) {
                Some(value) => (PathBuf::from(value), true),
                None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
            },
        };
        telemetry::log_source(&path, explicit);

        let overrides = [
            (
                "server.transport",
                profile
                    .transport
                    .clone()
                    .or_else(|| trimmed(TRANSPORT_ENV_KEY)),
            ),
            (
                "server.host",
                profile.host.clone().or_else(|| lookup(HOST_ENV_KEY)),
            ),
            (
                "server.port",
                profile
                    .port
                    .map(|port| port.to_string())
                    .or_else(|| lookup(PORT_ENV_KEY)),
            ),
            ("bybit.api_key", lookup(API_KEY_ENV_KEY)),
            ("bybit.api_secret", lookup(API_SECRET_ENV_KEY)),
            ("bybit.testnet", lookup(TESTNET_ENV_KEY)),
        ];

        let mut builder = config::Config::builder()
            .add_source(config::File::from(path.clone()).required(explicit));
        for (key, value) in overrides {
            builder = builder
                .set_override_option(key, value)
                .map_err(|err| ConfigError::from_read_error(path.clone(), err))?;
        }

        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "bybit_mcp::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration"
            );
            error
        })?;

        let raw: RawServerConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "bybit_mcp::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration"
            );
            error
        })?;

        let source_path = (explicit || path.exists()).then(|| path.clone());
        let config = Self::from_raw(raw, &path, source_path).map_err(|err| {
            error!(
                target: "bybit_mcp::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration"
            );
            err
        })?;

        info!(
            target: "bybit_mcp::config",
            path = %path.display(),
            "Configuration resolved"
        );
        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(
        raw: RawServerConfig,
        path: &std::path::Path,
        source_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let server = parse_server_section(raw.server, path)?;
        let bybit = parse_bybit_section(raw.bybit, path)?;

        Ok(Self {
            server,
            bybit,
            source_path,
        })
    }
}
