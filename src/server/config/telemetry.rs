use tracing::{debug, info};

use super::{ServerConfig, CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};

pub fn log_source(path: &std::path::Path, explicit: bool) {
    if explicit {
        info!(
            target: "bybit_mcp::config",
            path = %path.display(),
            "Loading configuration from explicit path"
        );
    } else {
        debug!(
            target: "bybit_mcp::config",
            path = %path.display(),
            env = CONFIG_ENV_KEY,
            default = DEFAULT_CONFIG_PATH,
            "MCP_CONFIG_PATH not set; using optional default config.toml"
        );
    }
}

pub fn log_loaded(config: &ServerConfig) {
    info!(
        target: "bybit_mcp::config",
        source = %config
            .source_path
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<defaults>".to_string()),
        transport = config.server.transport.as_str(),
        host = %config.server.host,
        port = config.server.port,
        network = config.bybit.network(),
        base_url = %config.bybit.base_url,
        credentials_configured = config.bybit.credentials.is_some(),
        recv_window = config.bybit.recv_window,
        "Configuration loaded successfully"
    );
}
