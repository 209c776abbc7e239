use crate::server::config::{ServerConfig, TransportMode};

/// Build the `ServerInfo.instructions` string shown to MCP clients.
pub fn build_instructions(config: &ServerConfig) -> String {
    let endpoint = match config.server.transport {
        TransportMode::Stdio => "stdio".to_string(),
        TransportMode::Sse => format!("http://{}/mcp", config.server.bind_addr()),
    };
    let credentials = if config.bybit.credentials.is_some() {
        "API credentials are configured; trading and position tools are available."
    } else {
        "No API credentials are configured; only market-data tools will succeed."
    };
    format!(
        "Bybit v5 REST API ({network}, {base_url}) served over {endpoint}. {credentials} \
         Read bybit://market/info for the market-data tool list.",
        network = config.bybit.network(),
        base_url = config.bybit.base_url,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bybit::Credentials, server::config::ServerSection};

    fn config() -> ServerConfig {
        ServerConfig {
            server: ServerSection::default(),
            bybit: Default::default(),
            source_path: None,
        }
    }

    #[test]
    fn instructions_mention_network_and_missing_credentials() {
        let text = build_instructions(&config());
        assert!(text.contains("mainnet"), "{text}");
        assert!(text.contains("only market-data tools"), "{text}");
        assert!(text.contains("stdio"), "{text}");
    }

    #[test]
    fn http_instructions_include_endpoint_url() {
        let mut config = config();
        config.server.transport = TransportMode::Sse;
        config.server.port = 9001;
        config.bybit.credentials = Some(Credentials::new("key", "secret"));
        let text = build_instructions(&config);
        assert!(text.contains("http://0.0.0.0:9001/mcp"), "{text}");
        assert!(text.contains("credentials are configured"), "{text}");
    }
}
